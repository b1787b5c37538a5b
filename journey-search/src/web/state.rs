//! Application state for the web layer.

use std::sync::Arc;

use crate::journeys::{CachedJourneyProvider, SampleJourneys};
use crate::stations::{Catalog, CatalogStatus, LoadedCatalog};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Station catalog, empty when it could not be loaded
    pub catalog: Arc<Catalog>,

    /// Outcome of the catalog load
    pub catalog_status: Arc<CatalogStatus>,

    /// Cached journey provider
    pub journeys: Arc<CachedJourneyProvider<SampleJourneys>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(loaded: LoadedCatalog, journeys: CachedJourneyProvider<SampleJourneys>) -> Self {
        Self {
            catalog: loaded.catalog,
            catalog_status: Arc::new(loaded.status),
            journeys: Arc::new(journeys),
        }
    }
}
