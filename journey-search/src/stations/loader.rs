//! One-shot catalog loading.
//!
//! The catalog is fetched once when the subsystem starts. A failed or
//! stalled fetch degrades to an empty catalog so autocomplete simply shows
//! nothing, while the reason stays available through [`CatalogStatus`].

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use super::catalog::Catalog;
use super::client::StationSource;
use super::error::StationError;

/// Outcome of the startup catalog load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CatalogStatus {
    /// The catalog loaded; `stations` is the number of usable stations.
    Ready { stations: usize },
    /// The catalog could not be loaded and is empty.
    Unavailable { reason: String },
}

impl CatalogStatus {
    /// Returns true if the catalog loaded.
    pub fn is_ready(&self) -> bool {
        matches!(self, CatalogStatus::Ready { .. })
    }
}

/// A loaded (possibly empty) catalog together with how it was obtained.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Arc<Catalog>,
    pub status: CatalogStatus,
}

impl LoadedCatalog {
    /// Wrap an already-built catalog.
    pub fn ready(catalog: Catalog) -> Self {
        let status = CatalogStatus::Ready {
            stations: catalog.len(),
        };
        Self {
            catalog: Arc::new(catalog),
            status,
        }
    }

    /// An empty catalog that could not be loaded for `reason`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            catalog: Arc::new(Catalog::empty()),
            status: CatalogStatus::Unavailable {
                reason: reason.into(),
            },
        }
    }
}

/// Fetch the catalog once, giving up after `timeout`.
///
/// Never fails: errors are logged and reported through the returned status.
pub async fn load_catalog<S: StationSource>(source: &S, timeout: Duration) -> LoadedCatalog {
    match fetch_with_timeout(source, timeout).await {
        Ok(catalog) => {
            info!(stations = catalog.len(), "station catalog loaded");
            LoadedCatalog::ready(catalog)
        }
        Err(e) => {
            warn!(error = %e, "station catalog unavailable, autocomplete disabled");
            LoadedCatalog::unavailable(e.to_string())
        }
    }
}

async fn fetch_with_timeout<S: StationSource>(
    source: &S,
    timeout: Duration,
) -> Result<Catalog, StationError> {
    let records = tokio::time::timeout(timeout, source.fetch())
        .await
        .map_err(|_| StationError::Timeout {
            secs: timeout.as_secs(),
        })??;

    Ok(Catalog::from_source(records))
}
