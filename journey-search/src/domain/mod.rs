//! Domain types for the journey search subsystem.
//!
//! This module contains the core value types shared by the station
//! autocomplete and the journey filter pipeline. Types enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity.

mod error;
mod journey;
mod station;
mod time;

pub use error::DomainError;
pub use journey::{ComfortScore, Journey, TrainClass};
pub use station::{SelectedStation, Station};
pub use time::{TimeError, format_hhmm, minutes_between, parse_duration_label, parse_hhmm};
