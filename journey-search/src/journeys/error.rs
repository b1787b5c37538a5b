//! Journey search error types.

use crate::domain::DomainError;

/// Errors from the journey search collaborator.
///
/// Searches are not retried; these are surfaced to the user as-is.
#[derive(Debug, Clone, thiserror::Error)]
pub enum JourneyError {
    /// The backend failed to answer
    #[error("journey search failed: {0}")]
    Backend(String),

    /// The backend returned a journey that breaks a domain rule
    #[error("invalid journey {train_number}: {source}")]
    InvalidJourney {
        train_number: String,
        source: DomainError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = JourneyError::Backend("connection refused".into());
        assert_eq!(err.to_string(), "journey search failed: connection refused");

        let err = JourneyError::InvalidJourney {
            train_number: "12952".into(),
            source: DomainError::InvalidFare(-5.0),
        };
        assert_eq!(
            err.to_string(),
            "invalid journey 12952: fare must be a non-negative number, got -5"
        );
    }
}
