//! Journey search requests.
//!
//! A search names an origin, a destination, a travel date and an optional
//! earliest departure time. When the time is omitted it defaults to the
//! current time for searches today and to midnight for later dates.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::domain::{TimeError, format_hhmm, parse_hhmm};

/// Minimum length of a station code in a request.
const MIN_CODE_LEN: usize = 2;

/// Validation errors for a search request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// A station was not chosen
    #[error("{field} station is required")]
    MissingStation { field: &'static str },

    /// A station was chosen but its catalog record carries no code
    #[error("{field} station has no station code")]
    StationWithoutCode { field: &'static str },

    /// A station code is too short to be real
    #[error("{field} station code must be at least 2 characters")]
    CodeTooShort { field: &'static str },

    /// Origin and destination are the same station
    #[error("origin and destination stations must be different")]
    SameStation,

    /// The travel date was not given
    #[error("journey date is required")]
    MissingDate,

    /// The travel date did not parse
    #[error("date must be in YYYY-MM-DD format")]
    BadDate,

    /// The travel date is before today
    #[error("date must be today or in the future (today is {today})")]
    PastDate { today: NaiveDate },

    /// The departure time did not parse
    #[error("departure time: {0}")]
    BadTime(#[from] TimeError),
}

/// A validated journey search, as forwarded to the results view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SearchRequest {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_hhmm")]
    pub time: NaiveTime,
}

fn serialize_hhmm<S: serde::Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_hhmm(*time))
}

/// A search as submitted over the wire, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchRequest {
    #[serde(alias = "source")]
    pub origin: String,
    pub destination: String,
    pub date: String,
    #[serde(default, alias = "departure_time")]
    pub time: Option<String>,
}

impl SearchRequest {
    /// Validate and normalise a search.
    ///
    /// Station codes are trimmed and upper-cased. `today` and `now` supply
    /// the clock so that validation is deterministic.
    pub fn new(
        origin: &str,
        destination: &str,
        date: NaiveDate,
        time: Option<NaiveTime>,
        today: NaiveDate,
        now: NaiveTime,
    ) -> Result<Self, RequestError> {
        let origin = normalize_code(origin, "origin")?;
        let destination = normalize_code(destination, "destination")?;
        if origin == destination {
            return Err(RequestError::SameStation);
        }

        if date < today {
            return Err(RequestError::PastDate { today });
        }

        let time = time.unwrap_or_else(|| default_time(date, today, now));

        Ok(Self {
            origin,
            destination,
            date,
            time,
        })
    }

    /// Validate a request received as strings.
    pub fn from_raw(
        raw: &RawSearchRequest,
        today: NaiveDate,
        now: NaiveTime,
    ) -> Result<Self, RequestError> {
        let date = raw.date.trim();
        if date.is_empty() {
            return Err(RequestError::MissingDate);
        }
        let date =
            NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| RequestError::BadDate)?;

        let time = match raw.time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(t) => Some(parse_hhmm(t)?),
        };

        Self::new(&raw.origin, &raw.destination, date, time, today, now)
    }
}

fn normalize_code(code: &str, field: &'static str) -> Result<String, RequestError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(RequestError::MissingStation { field });
    }
    if code.chars().count() < MIN_CODE_LEN {
        return Err(RequestError::CodeTooShort { field });
    }
    Ok(code.to_uppercase())
}

/// Searches today start now; later dates start at midnight.
fn default_time(date: NaiveDate, today: NaiveDate, now: NaiveTime) -> NaiveTime {
    if date == today {
        // Whole minutes, as the time is shown as HH:MM
        now.with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now)
    } else {
        NaiveTime::MIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn today() -> NaiveDate {
        d(2026, 1, 15)
    }

    fn raw(origin: &str, destination: &str, date: &str, time: Option<&str>) -> RawSearchRequest {
        RawSearchRequest {
            origin: origin.into(),
            destination: destination.into(),
            date: date.into(),
            time: time.map(str::to_string),
        }
    }

    #[test]
    fn valid_request_normalises_codes() {
        let req = SearchRequest::from_raw(
            &raw(" ndls", "bct ", "2026-01-20", Some("14:30")),
            today(),
            t(9, 0, 0),
        )
        .unwrap();

        assert_eq!(req.origin, "NDLS");
        assert_eq!(req.destination, "BCT");
        assert_eq!(req.date, d(2026, 1, 20));
        assert_eq!(req.time, t(14, 30, 0));
    }

    #[test]
    fn default_time_today_is_now() {
        let req =
            SearchRequest::from_raw(&raw("NDLS", "BCT", "2026-01-15", None), today(), t(9, 41, 27))
                .unwrap();
        assert_eq!(req.time, t(9, 41, 0));
    }

    #[test]
    fn default_time_future_is_midnight() {
        let req = SearchRequest::from_raw(
            &raw("NDLS", "BCT", "2026-02-01", Some("")),
            today(),
            t(9, 41, 0),
        )
        .unwrap();
        assert_eq!(req.time, NaiveTime::MIN);
    }

    #[test]
    fn rejects_same_station() {
        let err = SearchRequest::from_raw(&raw("ndls", "NDLS", "2026-01-20", None), today(), t(9, 0, 0))
            .unwrap_err();
        assert_eq!(err, RequestError::SameStation);
    }

    #[test]
    fn rejects_short_and_missing_codes() {
        let now = t(9, 0, 0);
        assert_eq!(
            SearchRequest::from_raw(&raw("", "BCT", "2026-01-20", None), today(), now),
            Err(RequestError::MissingStation { field: "origin" })
        );
        assert_eq!(
            SearchRequest::from_raw(&raw("NDLS", "B", "2026-01-20", None), today(), now),
            Err(RequestError::CodeTooShort {
                field: "destination"
            })
        );
    }

    #[test]
    fn rejects_bad_dates() {
        let now = t(9, 0, 0);
        assert_eq!(
            SearchRequest::from_raw(&raw("NDLS", "BCT", "", None), today(), now),
            Err(RequestError::MissingDate)
        );
        assert_eq!(
            SearchRequest::from_raw(&raw("NDLS", "BCT", "15/01/2026", None), today(), now),
            Err(RequestError::BadDate)
        );
        assert_eq!(
            SearchRequest::from_raw(&raw("NDLS", "BCT", "2026-01-14", None), today(), now),
            Err(RequestError::PastDate { today: today() })
        );
    }

    #[test]
    fn rejects_bad_time() {
        let err = SearchRequest::from_raw(
            &raw("NDLS", "BCT", "2026-01-20", Some("25:00")),
            today(),
            t(9, 0, 0),
        )
        .unwrap_err();
        assert!(matches!(err, RequestError::BadTime(_)));
    }

    #[test]
    fn accepts_source_alias() {
        let raw: RawSearchRequest = serde_json::from_str(
            r#"{"source": "NDLS", "destination": "MAS", "date": "2026-01-20", "departure_time": "06:00"}"#,
        )
        .unwrap();
        assert_eq!(raw.origin, "NDLS");
        assert_eq!(raw.time.as_deref(), Some("06:00"));
    }

    #[test]
    fn serialises_time_as_hhmm() {
        let req = SearchRequest::new("NDLS", "BCT", d(2026, 1, 20), Some(t(6, 5, 0)), today(), t(0, 0, 0))
            .unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["time"], "06:05");
        assert_eq!(json["date"], "2026-01-20");
    }
}
