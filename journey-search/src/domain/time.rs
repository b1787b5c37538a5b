//! Clock time helpers.
//!
//! Journey records carry wall-clock times as "HH:MM" strings and durations
//! as free text such as "15h 40m". This module parses both.

use chrono::{NaiveTime, Timelike};

/// Minutes in a day, used to wrap overnight journeys.
const MINUTES_PER_DAY: u32 = 24 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse a time of day from "HH:MM" (24-hour) format.
///
/// # Examples
///
/// ```
/// use journey_search::domain::parse_hhmm;
///
/// assert!(parse_hhmm("00:00").is_ok());
/// assert!(parse_hhmm("23:59").is_ok());
///
/// assert!(parse_hhmm("1430").is_err());
/// assert!(parse_hhmm("14:3").is_err());
/// assert!(parse_hhmm("25:00").is_err());
/// ```
pub fn parse_hhmm(s: &str) -> Result<NaiveTime, TimeError> {
    if s.len() != 5 {
        return Err(TimeError::new("expected HH:MM format"));
    }

    let bytes = s.as_bytes();

    if bytes[2] != b':' {
        return Err(TimeError::new("expected colon at position 2"));
    }

    let hour =
        parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
    if hour > 23 {
        return Err(TimeError::new("hour must be 0-23"));
    }

    let minute =
        parse_two_digits(&bytes[3..5]).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| TimeError::new("invalid time"))
}

/// Format a time of day as "HH:MM".
pub fn format_hhmm(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        }
        _ => None,
    }
}

/// Parse a duration label like "15h 40m", "2h" or "45m" into minutes.
///
/// Returns `None` for anything else.
pub fn parse_duration_label(s: &str) -> Option<u32> {
    let mut total = 0u32;
    let mut seen_any = false;

    for part in s.split_whitespace() {
        let (digits, factor) = if let Some(h) = part.strip_suffix('h') {
            (h, 60)
        } else if let Some(m) = part.strip_suffix('m') {
            (m, 1)
        } else {
            return None;
        };

        let value: u32 = digits.parse().ok()?;
        total = total.checked_add(value.checked_mul(factor)?)?;
        seen_any = true;
    }

    seen_any.then_some(total)
}

/// Minutes from `departure` to `arrival`, assuming arrival is at most one
/// day later. An arrival earlier in the day than the departure is treated
/// as the next morning.
pub fn minutes_between(departure: NaiveTime, arrival: NaiveTime) -> u32 {
    let dep = departure.hour() * 60 + departure.minute();
    let arr = arrival.hour() * 60 + arrival.minute();
    (arr + MINUTES_PER_DAY - dep) % MINUTES_PER_DAY
}

/// Serde adapter for "HH:MM" times.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_hhmm(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        assert_eq!(parse_hhmm("00:00").unwrap(), t(0, 0));
        assert_eq!(parse_hhmm("09:05").unwrap(), t(9, 5));
        assert_eq!(parse_hhmm("23:59").unwrap(), t(23, 59));
    }

    #[test]
    fn reject_bad_times() {
        assert!(parse_hhmm("").is_err());
        assert!(parse_hhmm("9:05").is_err());
        assert!(parse_hhmm("09-05").is_err());
        assert!(parse_hhmm("24:00").is_err());
        assert!(parse_hhmm("12:60").is_err());
        assert!(parse_hhmm("ab:cd").is_err());
    }

    #[test]
    fn format_pads() {
        assert_eq!(format_hhmm(t(7, 3)), "07:03");
    }

    #[test]
    fn duration_labels() {
        assert_eq!(parse_duration_label("15h 40m"), Some(940));
        assert_eq!(parse_duration_label("2h"), Some(120));
        assert_eq!(parse_duration_label("45m"), Some(45));
        assert_eq!(parse_duration_label(""), None);
        assert_eq!(parse_duration_label("two hours"), None);
        assert_eq!(parse_duration_label("3x"), None);
    }

    #[test]
    fn minutes_between_same_day() {
        assert_eq!(minutes_between(t(10, 0), t(11, 30)), 90);
    }

    #[test]
    fn minutes_between_overnight() {
        assert_eq!(minutes_between(t(23, 30), t(0, 15)), 45);
    }
}
