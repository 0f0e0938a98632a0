use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::ValidationError;
use crate::models::Priority;

/// Display theme. Only changes how things look and read; never what is stored.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Normal,
    Horror,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Normal => Theme::Horror,
            Theme::Horror => Theme::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Normal => "normal",
            Theme::Horror => "horror",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Theme::Normal => "💖 Sweet Reminders",
            Theme::Horror => "🎃 Haunted Reminders",
        }
    }

    pub fn priority_icon(&self, priority: Priority) -> &'static str {
        match (self, priority) {
            (Theme::Normal, Priority::High) => "🔥",
            (Theme::Normal, Priority::Medium) => "💖",
            (Theme::Normal, Priority::Low) => "🌸",
            (Theme::Horror, Priority::High) => "💀",
            (Theme::Horror, Priority::Medium) => "🦇",
            (Theme::Horror, Priority::Low) => "🕷️",
        }
    }

    pub fn done_mark(&self) -> &'static str {
        match self {
            Theme::Normal => "✓",
            Theme::Horror => "🎃",
        }
    }

    pub fn empty_list(&self) -> &'static str {
        match self {
            Theme::Normal => "🌟 No tasks here!",
            Theme::Horror => "🕸️ No spooky tasks here!",
        }
    }

    pub fn task_added(&self) -> &'static str {
        match self {
            Theme::Normal => "✨ Task added!",
            Theme::Horror => "🎃 Spooky task added!",
        }
    }

    pub fn task_toggled(&self, completed: bool) -> &'static str {
        match (self, completed) {
            (Theme::Normal, true) => "🎉 Task completed!",
            (Theme::Normal, false) => "🔄 Task reopened",
            (Theme::Horror, true) => "💀 Task vanquished!",
            (Theme::Horror, false) => "👻 Task rises again",
        }
    }

    pub fn task_deleted(&self) -> &'static str {
        match self {
            Theme::Normal => "🗑️ Task deleted",
            Theme::Horror => "🗡️ Task slain",
        }
    }

    pub fn level_heading(&self) -> &'static str {
        match self {
            Theme::Normal => "🎯 Reward Level",
            Theme::Horror => "🏆 Achievement Level",
        }
    }

    pub fn calendar_name(&self) -> &'static str {
        match self {
            Theme::Normal => "Google Calendar",
            Theme::Horror => "Mystical Calendar",
        }
    }

    pub fn calendar_connected(&self) -> &'static str {
        match self {
            Theme::Normal => "📅 Connected to Google Calendar! Your reminders will sync automatically.",
            Theme::Horror => "🦇 Connected to the mystical calendar! Your tasks will now haunt your calendar too.",
        }
    }

    pub fn calendar_disconnected(&self) -> &'static str {
        match self {
            Theme::Normal => "📅 Disconnected from Google Calendar",
            Theme::Horror => "👻 Disconnected from the calendar spirits",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Theme::Normal),
            "horror" => Ok(Theme::Horror),
            _ => Err(ValidationError::InvalidTheme(s.to_string())),
        }
    }
}
