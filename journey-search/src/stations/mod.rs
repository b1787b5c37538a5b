//! Station catalog loading.
//!
//! Reads station records from a file or HTTP source once at startup and
//! normalises them into the read-only [`Catalog`] used by autocomplete.

mod catalog;
mod client;
mod error;
mod loader;

pub use catalog::{Catalog, DecodedRecords, RecordId, StationRecord, StationRecords, normalize};
pub use client::{FileStationSource, HttpSourceConfig, HttpStationSource, StationSource};
pub use error::StationError;
pub use loader::{CatalogStatus, LoadedCatalog, load_catalog};
