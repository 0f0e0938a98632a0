//! Display formatting for due dates and times.
//!
//! Everything here is a pure string transform; the time zone is always passed
//! in so results do not depend on the machine running them.

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveTime, Offset, TimeZone, Timelike};
use crate::error::ValidationError;

/// Time used when a due date is given without a time of day.
pub const END_OF_DAY: &str = "23:59";

/// Parses a 24-hour `HH:MM` string.
pub fn parse_due_time(time: &str) -> Result<NaiveTime, ValidationError> {
    let invalid = || ValidationError::InvalidTime(time.to_string());
    let (hours, minutes) = time.split_once(':').ok_or_else(invalid)?;
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 || !digits(hours) || !digits(minutes) {
        return Err(invalid());
    }
    let hour: u32 = hours.parse().map_err(|_| invalid())?;
    let minute: u32 = minutes.parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Renders `HH:MM` on a 12-hour clock: `"13:05"` becomes `"1:05 PM"`.
pub fn format_due_time(time: &str) -> Result<String, ValidationError> {
    let parsed = parse_due_time(time)?;
    let hour = parsed.hour();
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    Ok(format!("{}:{:02} {}", display_hour, parsed.minute(), meridiem))
}

/// Renders an epoch-millisecond timestamp as `"Mon, Jan 15, 2024"` in `tz`.
pub fn format_due_date<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(utc) => utc.with_timezone(tz).format("%a, %b %-d, %Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}

/// [`format_due_date`] in the machine's local zone.
pub fn format_due_date_local(timestamp_ms: i64) -> String {
    format_due_date(timestamp_ms, &Local)
}

/// Combines a `YYYY-MM-DD` date and an optional `HH:MM` time into epoch
/// milliseconds, interpreting both as wall-clock time in `tz`.
///
/// A missing time means the end of that day ([`END_OF_DAY`]). A wall time
/// skipped by a DST jump is read with the offset in force before the jump,
/// so it lands just past the gap (02:30 becomes 03:30).
pub fn due_timestamp<Tz: TimeZone>(
    date: &str,
    time: Option<&str>,
    tz: &Tz,
) -> Result<i64, ValidationError> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))?;
    let clock = parse_due_time(time.map(str::trim).unwrap_or(END_OF_DAY))?;
    let naive = day.and_time(clock);
    let resolved = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before = tz
                .from_local_datetime(&(naive - Duration::hours(24)))
                .earliest()
                .ok_or_else(|| ValidationError::InvalidDate(date.to_string()))?;
            let offset = Duration::seconds(i64::from(before.offset().fix().local_minus_utc()));
            return Ok((naive - offset).and_utc().timestamp_millis());
        }
    };
    Ok(resolved.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn twelve_hour_conversion() {
        assert_eq!(format_due_time("00:00").unwrap(), "12:00 AM");
        assert_eq!(format_due_time("13:05").unwrap(), "1:05 PM");
        assert_eq!(format_due_time("12:00").unwrap(), "12:00 PM");
        assert_eq!(format_due_time("09:45").unwrap(), "9:45 AM");
        assert_eq!(format_due_time("23:59").unwrap(), "11:59 PM");
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["", "1305", "24:00", "12:60", "ab:cd", "7:5", "123:00"] {
            assert_eq!(
                format_due_time(bad),
                Err(ValidationError::InvalidTime(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn formats_date_in_given_zone() {
        // 2024-01-15T23:30:00Z
        let ts = 1_705_361_400_000;
        assert_eq!(format_due_date(ts, &Utc), "Mon, Jan 15, 2024");
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(format_due_date(ts, &tokyo), "Tue, Jan 16, 2024");
    }

    #[test]
    fn out_of_range_timestamp() {
        assert_eq!(format_due_date(i64::MAX, &Utc), "Invalid Date");
    }

    #[test]
    fn due_timestamp_defaults_to_end_of_day() {
        let ts = due_timestamp("2024-01-15", None, &Utc).unwrap();
        assert_eq!(ts, 1_705_363_140_000);
        let with_time = due_timestamp("2024-01-15", Some("13:05"), &Utc).unwrap();
        assert_eq!(with_time, 1_705_323_900_000);
    }

    #[test]
    fn time_in_spring_forward_gap_moves_past_it() {
        let ny = chrono_tz::America::New_York;
        let ts = due_timestamp("2024-03-10", Some("02:30"), &ny).unwrap();
        let local = DateTime::from_timestamp_millis(ts).unwrap().with_timezone(&ny);
        assert_eq!(local.format("%Y-%m-%d %H:%M").to_string(), "2024-03-10 03:30");
        assert_eq!(format_due_date(ts, &ny), "Sun, Mar 10, 2024");
    }

    #[test]
    fn repeated_fall_back_hour_takes_earlier_instant() {
        let ny = chrono_tz::America::New_York;
        let ts = due_timestamp("2024-11-03", Some("01:30"), &ny).unwrap();
        let utc = DateTime::from_timestamp_millis(ts).unwrap();
        assert_eq!(utc.format("%H:%M").to_string(), "05:30");
    }

    #[test]
    fn due_timestamp_rejects_bad_date() {
        assert_eq!(
            due_timestamp("15/01/2024", None, &Utc),
            Err(ValidationError::InvalidDate("15/01/2024".into()))
        );
    }
}
