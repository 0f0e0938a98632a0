//! Calendar sync capability.
//!
//! Only a simulated provider exists: connecting flips a flag and nothing is
//! sent anywhere. Tasks would be exported from `due_date`/`due_time` and the
//! `reminder_sent` flag once a real provider is written.

use log::info;
use crate::error::Result;

pub trait CalendarSync {
    fn connect(&mut self) -> Result<()>;
    fn disconnect(&mut self) -> Result<()>;
    fn is_connected(&self) -> bool;
}

/// A provider that only records whether the user asked to be connected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulatedCalendar {
    connected: bool,
}

impl SimulatedCalendar {
    pub fn new(connected: bool) -> Self {
        SimulatedCalendar { connected }
    }
}

impl CalendarSync for SimulatedCalendar {
    fn connect(&mut self) -> Result<()> {
        if !self.connected {
            info!("event=calendar_connect provider=simulated status=ok");
        }
        self.connected = true;
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        if self.connected {
            info!("event=calendar_disconnect provider=simulated status=ok");
        }
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
