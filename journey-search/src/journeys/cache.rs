//! Caching layer for journey searches.
//!
//! Identical searches within the TTL are answered from memory. Only
//! successful results are cached; failures always reach the provider.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::Journey;

use super::error::JourneyError;
use super::provider::{JourneyProvider, validate_journeys};
use super::request::SearchRequest;

/// Configuration for the journey cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// A journey provider with result caching.
///
/// Results are checked with [`validate_journeys`] before they are cached,
/// so callers never see a journey that breaks a domain rule.
pub struct CachedJourneyProvider<P> {
    inner: P,
    cache: MokaCache<SearchRequest, Arc<Vec<Journey>>>,
}

impl<P: JourneyProvider + Sync> CachedJourneyProvider<P> {
    /// Wrap a provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, cache }
    }

    /// Search, using the cache if possible.
    pub async fn search_cached(
        &self,
        request: &SearchRequest,
    ) -> Result<Arc<Vec<Journey>>, JourneyError> {
        if let Some(cached) = self.cache.get(request).await {
            debug!(origin = %request.origin, destination = %request.destination, "journey cache hit");
            return Ok(cached);
        }

        let journeys = self.inner.search(request).await?;
        validate_journeys(&journeys)?;

        let entry = Arc::new(journeys);
        self.cache.insert(request.clone(), Arc::clone(&entry)).await;

        Ok(entry)
    }

    /// Access the wrapped provider.
    pub fn provider(&self) -> &P {
        &self.inner
    }

    /// Number of cached searches.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Drop every cached search.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}
