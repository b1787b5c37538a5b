//! Journey search results.
//!
//! Validates search requests, obtains journeys from the search
//! collaborator, and runs them through the filter/sort pipeline.

mod cache;
mod error;
pub(crate) mod filter;
mod provider;
mod ranking;
mod request;
mod results;

pub use cache::{CacheConfig, CachedJourneyProvider};
pub use error::JourneyError;
pub use filter::{FilterCriteria, SortKey, UnknownSortKey, apply};
pub use provider::{JourneyProvider, SampleJourneys, validate_journeys};
pub use ranking::{DEFAULT_LIMIT, MAX_LIMIT, Ranking, SortOrder, clamp_limit, rank};
pub use request::{RawSearchRequest, RequestError, SearchRequest};
pub use results::JourneyResults;
