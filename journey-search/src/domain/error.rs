//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from catalog loading and HTTP errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Station records must carry a non-empty name
    #[error("station name must not be empty")]
    EmptyStationName,

    /// Train class outside AC / Sleeper / General
    #[error("unknown train class: {0}")]
    UnknownTrainClass(String),

    /// Comfort score outside 0-5
    #[error("comfort score {0} is out of range (expected 0-5)")]
    ComfortOutOfRange(u8),

    /// Fares are never negative
    #[error("fare must be a non-negative number, got {0}")]
    InvalidFare(f64),
}
