//! Journey types.
//!
//! A `Journey` is one option returned by the journey search collaborator:
//! a train (possibly with changes) from origin to destination, with its fare,
//! class and comfort rating.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::DomainError;
use super::time::{hhmm, minutes_between, parse_duration_label};

/// Travel class of a journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrainClass {
    #[serde(rename = "AC")]
    Ac,
    Sleeper,
    General,
}

impl TrainClass {
    /// All classes, in display order.
    pub const ALL: [TrainClass; 3] = [TrainClass::Ac, TrainClass::Sleeper, TrainClass::General];

    /// Returns the class label as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainClass::Ac => "AC",
            TrainClass::Sleeper => "Sleeper",
            TrainClass::General => "General",
        }
    }
}

impl FromStr for TrainClass {
    type Err = DomainError;

    /// Parses a class label, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TrainClass::ALL
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DomainError::UnknownTrainClass(trimmed.to_string()))
    }
}

impl fmt::Display for TrainClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A journey quality rating from 0 to 5 inclusive.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct ComfortScore(u8);

impl ComfortScore {
    /// Highest possible rating.
    pub const MAX: u8 = 5;

    /// Create a score, rejecting values above 5.
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value > Self::MAX {
            return Err(DomainError::ComfortOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the numeric rating.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ComfortScore {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ComfortScore> for u8 {
    fn from(score: ComfortScore) -> Self {
        score.0
    }
}

/// A journey option.
///
/// `train_number` uniquely identifies the journey within a result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub train_number: String,
    pub train_name: String,
    pub departure_station: String,
    #[serde(with = "hhmm")]
    pub departure_time: NaiveTime,
    pub arrival_station: String,
    #[serde(with = "hhmm")]
    pub arrival_time: NaiveTime,
    /// Human-readable duration, e.g. "15h 40m".
    pub duration: String,
    pub transfers: u32,
    pub fare: f64,
    pub train_class: TrainClass,
    pub comfort_score: ComfortScore,
}

impl Journey {
    /// Check the invariants that the type system does not already enforce.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.fare.is_finite() || self.fare < 0.0 {
            return Err(DomainError::InvalidFare(self.fare));
        }
        Ok(())
    }

    /// Total travel time in minutes.
    ///
    /// Uses the `duration` label when it parses, since it covers multi-day
    /// journeys; otherwise derives it from the departure and arrival times.
    pub fn travel_minutes(&self) -> u32 {
        parse_duration_label(&self.duration)
            .unwrap_or_else(|| minutes_between(self.departure_time, self.arrival_time))
    }

    /// Returns true when the journey needs no change of train.
    pub fn is_direct(&self) -> bool {
        self.transfers == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn journey() -> Journey {
        Journey {
            train_number: "12952".to_string(),
            train_name: "Mumbai Rajdhani".to_string(),
            departure_station: "New Delhi".to_string(),
            departure_time: t(16, 55),
            arrival_station: "Mumbai Central".to_string(),
            arrival_time: t(8, 35),
            duration: "15h 40m".to_string(),
            transfers: 1,
            fare: 850.0,
            train_class: TrainClass::Ac,
            comfort_score: ComfortScore::new(4).unwrap(),
        }
    }

    #[test]
    fn train_class_parse_ignores_case() {
        assert_eq!("ac".parse::<TrainClass>().unwrap(), TrainClass::Ac);
        assert_eq!(" SLEEPER ".parse::<TrainClass>().unwrap(), TrainClass::Sleeper);
        assert_eq!("General".parse::<TrainClass>().unwrap(), TrainClass::General);
        assert_eq!(
            "First".parse::<TrainClass>(),
            Err(DomainError::UnknownTrainClass("First".to_string()))
        );
    }

    #[test]
    fn comfort_score_range() {
        assert!(ComfortScore::new(0).is_ok());
        assert!(ComfortScore::new(5).is_ok());
        assert_eq!(ComfortScore::new(6), Err(DomainError::ComfortOutOfRange(6)));
    }

    #[test]
    fn validate_rejects_negative_fare() {
        let mut j = journey();
        assert!(j.validate().is_ok());
        j.fare = -10.0;
        assert!(j.validate().is_err());
        j.fare = f64::NAN;
        assert!(j.validate().is_err());
    }

    #[test]
    fn travel_minutes_prefers_label() {
        let j = journey();
        assert_eq!(j.travel_minutes(), 940);
    }

    #[test]
    fn travel_minutes_falls_back_to_times() {
        let mut j = journey();
        j.duration = "overnight".to_string();
        assert_eq!(j.travel_minutes(), 940);

        j.departure_time = t(6, 0);
        j.arrival_time = t(9, 15);
        assert_eq!(j.travel_minutes(), 195);
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_value(journey()).unwrap();
        assert_eq!(json["trainNumber"], "12952");
        assert_eq!(json["departureTime"], "16:55");
        assert_eq!(json["trainClass"], "AC");
        assert_eq!(json["comfortScore"], 4);

        let back: Journey = serde_json::from_value(json).unwrap();
        assert_eq!(back, journey());
    }

    #[test]
    fn json_rejects_bad_comfort() {
        let mut json = serde_json::to_value(journey()).unwrap();
        json["comfortScore"] = serde_json::json!(9);
        assert!(serde_json::from_value::<Journey>(json).is_err());
    }
}
