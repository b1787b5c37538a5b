//! Application configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::journeys::CacheConfig;
use crate::stations::HttpSourceConfig;

const ADDR_VAR: &str = "JOURNEY_SEARCH_ADDR";
const STATIONS_FILE_VAR: &str = "STATIONS_FILE";
const STATIONS_URL_VAR: &str = "STATIONS_URL";
const STATIONS_API_KEY_VAR: &str = "STATIONS_API_KEY";
const CATALOG_TIMEOUT_VAR: &str = "CATALOG_TIMEOUT_SECS";

/// Default bind address.
pub const DEFAULT_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
    3000,
);

/// Default time allowed for the one-shot catalog load.
pub const DEFAULT_CATALOG_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the station catalog is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSourceConfig {
    /// A JSON file on disk.
    File(PathBuf),
    /// An HTTP endpoint returning JSON.
    Http(HttpSourceConfig),
    /// No source configured; the catalog starts empty.
    None,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub catalog_source: CatalogSourceConfig,
    pub catalog_timeout: Duration,
    pub cache: CacheConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR,
            catalog_source: CatalogSourceConfig::None,
            catalog_timeout: DEFAULT_CATALOG_TIMEOUT,
            cache: CacheConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`.
    ///
    /// Blank values count as unset. Values that fail to parse fall back to
    /// the default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let addr = parse_or(ADDR_VAR, get(ADDR_VAR), DEFAULT_ADDR);
        let catalog_timeout = Duration::from_secs(parse_or(
            CATALOG_TIMEOUT_VAR,
            get(CATALOG_TIMEOUT_VAR),
            DEFAULT_CATALOG_TIMEOUT.as_secs(),
        ));

        let catalog_source = match (get(STATIONS_FILE_VAR), get(STATIONS_URL_VAR)) {
            (Some(path), url) => {
                if url.is_some() {
                    warn!("both {STATIONS_FILE_VAR} and {STATIONS_URL_VAR} set; using the file");
                }
                CatalogSourceConfig::File(PathBuf::from(path))
            }
            (None, Some(url)) => {
                let mut http = HttpSourceConfig::new(url);
                http.api_key = get(STATIONS_API_KEY_VAR);
                http.timeout_secs = catalog_timeout.as_secs().max(1);
                CatalogSourceConfig::Http(http)
            }
            (None, None) => CatalogSourceConfig::None,
        };

        Self {
            addr,
            catalog_source,
            catalog_timeout,
            cache: CacheConfig::default(),
        }
    }
}

fn parse_or<T: FromStr + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(%key, value = %raw, %default, "unparseable setting, using default");
            default
        }),
    }
}
