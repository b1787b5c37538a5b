//! Station catalog error types.

/// Errors that can occur while fetching the station catalog.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check STATIONS_API_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the catalog JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Failed to read a catalog file
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// The source did not answer in time
    #[error("catalog fetch timed out after {secs}s")]
    Timeout { secs: u64 },
}
