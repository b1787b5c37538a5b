//! Station catalog sources.
//!
//! The catalog is read once at startup from either a local JSON file or an
//! HTTP endpoint. Both return [`StationRecords`] in whichever shape the
//! source publishes.

use std::future::Future;
use std::path::PathBuf;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::catalog::StationRecords;
use super::error::StationError;

/// A one-shot provider of station records.
pub trait StationSource {
    /// Fetch every station record the source knows about.
    fn fetch(&self) -> impl Future<Output = Result<StationRecords, StationError>> + Send;
}

/// Reads the catalog from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStationSource {
    path: PathBuf,
}

impl FileStationSource {
    /// Create a source for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StationSource for FileStationSource {
    async fn fetch(&self) -> Result<StationRecords, StationError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| StationError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        parse_records(&contents)
    }
}

/// Configuration for the HTTP catalog source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSourceConfig {
    /// URL returning the catalog JSON
    pub url: String,
    /// Optional API key sent as the `x-apikey` header
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl HttpSourceConfig {
    /// Create a new config for the given URL with a 30 second timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            timeout_secs: 30,
        }
    }

    /// Send an API key with every request.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// Fetches the catalog from an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpStationSource {
    http: reqwest::Client,
    url: String,
}

impl HttpStationSource {
    /// Create a new HTTP source.
    pub fn new(config: HttpSourceConfig) -> Result<Self, StationError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).map_err(|_| StationError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
            headers.insert(HeaderName::from_static("x-apikey"), value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }
}

impl StationSource for HttpStationSource {
    async fn fetch(&self) -> Result<StationRecords, StationError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StationError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_records(&body)
    }
}

fn parse_records(body: &str) -> Result<StationRecords, StationError> {
    serde_json::from_str(body).map_err(|e| StationError::Json {
        message: e.to_string(),
    })
}
