//! Timing configuration for station autocomplete.

use std::time::Duration;

/// Timing parameters for a station input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteConfig {
    /// Input must be quiet this long before the matcher runs.
    pub quiet_window: Duration,

    /// Delay between losing focus and closing the candidate list.
    /// A candidate click inside this window is still honoured.
    pub blur_close_delay: Duration,
}

impl AutocompleteConfig {
    /// Create a configuration with explicit timings.
    pub fn new(quiet_window: Duration, blur_close_delay: Duration) -> Self {
        Self {
            quiet_window,
            blur_close_delay,
        }
    }
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            quiet_window: Duration::from_millis(300),
            blur_close_delay: Duration::from_millis(150),
        }
    }
}
