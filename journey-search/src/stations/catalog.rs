//! The station catalog and the raw records it is built from.
//!
//! Catalog sources publish station records either as a JSON array or as an
//! object keyed by station code. Both shapes are normalised into one
//! ordered, read-only [`Catalog`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::Station;

/// Zone recorded for stations whose source record has none.
const UNKNOWN_ZONE: &str = "Unknown";

/// Normalise free text for matching: trimmed and case-folded.
///
/// Queries and catalog names go through the same folding so that matching
/// is case-insensitive.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A station identifier as found in source data (number or string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    fn into_string(self) -> String {
        match self {
            RecordId::Number(n) => n.to_string(),
            RecordId::Text(s) => s,
        }
    }
}

/// One station record as published by a catalog source.
///
/// Every field is optional so that one malformed record never prevents the
/// rest of the catalog from loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationRecord {
    #[serde(default)]
    pub stop_id: Option<RecordId>,
    #[serde(default)]
    pub stop_name: Option<String>,
    #[serde(default)]
    pub stop_code: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
}

/// The two catalog shapes a source may return.
///
/// Only the outer shape is checked here. Each record is decoded on its own
/// by [`StationRecords::into_records`], so one malformed record never takes
/// the rest of the document down with it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StationRecords {
    /// A plain array of records.
    List(Vec<Value>),
    /// An object keyed by station code.
    Keyed(BTreeMap<String, Value>),
}

impl StationRecords {
    /// Wrap already-typed records as a list document.
    pub fn from_records(records: impl IntoIterator<Item = StationRecord>) -> Self {
        StationRecords::List(
            records
                .into_iter()
                .filter_map(|r| serde_json::to_value(r).ok())
                .collect(),
        )
    }

    /// Decode every record, in order.
    ///
    /// Keyed input is ordered by key. A keyed record without its own
    /// `stop_code` takes the key as its code. Records that do not decode
    /// are skipped and counted in [`DecodedRecords::malformed`].
    pub fn into_records(self) -> DecodedRecords {
        let mut decoded = DecodedRecords::default();
        match self {
            StationRecords::List(values) => {
                for value in values {
                    decoded.push(decode(value));
                }
            }
            StationRecords::Keyed(map) => {
                for (key, value) in map {
                    decoded.push(decode(value).map(|mut record| {
                        if record.stop_code.as_deref().is_none_or(|c| c.trim().is_empty()) {
                            record.stop_code = Some(key);
                        }
                        record
                    }));
                }
            }
        }
        decoded
    }
}

/// Records decoded from a source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedRecords {
    pub records: Vec<StationRecord>,
    /// Records whose JSON did not match the record shape.
    pub malformed: usize,
}

impl DecodedRecords {
    fn push(&mut self, record: Option<StationRecord>) {
        match record {
            Some(record) => self.records.push(record),
            None => self.malformed += 1,
        }
    }
}

fn decode(value: Value) -> Option<StationRecord> {
    serde_json::from_value(value)
        .inspect_err(|e| debug!(error = %e, "skipping malformed station record"))
        .ok()
}

/// A station plus its pre-folded search keys.
#[derive(Debug, Clone)]
pub(crate) struct CatalogEntry {
    pub(crate) station: Station,
    pub(crate) name_key: String,
    pub(crate) code_key: String,
}

impl CatalogEntry {
    fn new(station: Station) -> Self {
        let name_key = normalize(station.name());
        let code_key = normalize(station.code());
        Self {
            station,
            name_key,
            code_key,
        }
    }
}

/// The read-only, ordered station catalog for a session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// An empty catalog (no suggestions will ever be produced).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from stations, keeping their order.
    pub fn new(stations: Vec<Station>) -> Self {
        Self {
            entries: stations.into_iter().map(CatalogEntry::new).collect(),
        }
    }

    /// Build a catalog from raw source records.
    ///
    /// Records without a usable name are dropped. A missing code becomes an
    /// empty code, which never matches a query.
    pub fn from_records(records: Vec<StationRecord>) -> Self {
        Self::build(records, 0)
    }

    /// Build a catalog from a whole source document.
    ///
    /// Malformed records are dropped along with nameless ones; the rest of
    /// the document still loads.
    pub fn from_source(source: StationRecords) -> Self {
        let DecodedRecords { records, malformed } = source.into_records();
        Self::build(records, malformed)
    }

    fn build(records: Vec<StationRecord>, malformed: usize) -> Self {
        let total = records.len() + malformed;
        let stations: Vec<Station> = records
            .into_iter()
            .enumerate()
            .filter_map(|(idx, record)| station_from_record(idx, record))
            .collect();

        let dropped = total - stations.len();
        if dropped > 0 {
            warn!(dropped, malformed, total, "dropped unusable station records");
        }
        debug!(stations = stations.len(), "built station catalog");

        Self::new(stations)
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no stations.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over stations in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.entries.iter().map(|e| &e.station)
    }

    pub(crate) fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Look up a station by its exact code, ignoring case.
    ///
    /// When several stations share a code, the first in catalog order wins.
    pub fn get_by_code(&self, code: &str) -> Option<&Station> {
        let key = normalize(code);
        if key.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.code_key == key)
            .map(|e| &e.station)
    }

    /// Look up a station by identifier.
    pub fn get_by_id(&self, id: &str) -> Option<&Station> {
        self.iter().find(|s| s.id() == id)
    }

    /// Stations in the given zone, ignoring case.
    pub fn in_zone(&self, zone: &str) -> Vec<&Station> {
        let zone = zone.trim();
        self.iter()
            .filter(|s| s.zone().eq_ignore_ascii_case(zone))
            .collect()
    }
}

fn station_from_record(idx: usize, record: StationRecord) -> Option<Station> {
    let id = record
        .stop_id
        .map(RecordId::into_string)
        .unwrap_or_else(|| idx.to_string());
    let code = record.stop_code.unwrap_or_default();
    let zone = record
        .zone
        .filter(|z| !z.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_ZONE.to_string());

    match Station::new(id, record.stop_name.unwrap_or_default(), &code, zone) {
        Ok(station) => Some(station),
        Err(_) => {
            debug!(index = idx, code = %code, "skipping station record without a name");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: Option<&str>, code: Option<&str>, zone: Option<&str>) -> StationRecord {
        StationRecord {
            stop_id: Some(RecordId::Number(id)),
            stop_name: name.map(str::to_string),
            stop_code: code.map(str::to_string),
            zone: zone.map(str::to_string),
        }
    }

    #[test]
    fn normalize_trims_and_folds() {
        assert_eq!(normalize("  MumBai "), "mumbai");
        assert_eq!(normalize("\t"), "");
    }

    #[test]
    fn parse_list_shape() {
        let json = r#"[
            {"stop_id": 1, "stop_name": "New Delhi", "stop_code": "NDLS", "zone": "NR"},
            {"stop_id": "2", "stop_name": "Chennai Central", "stop_code": "MAS"}
        ]"#;
        let records: StationRecords = serde_json::from_str(json).unwrap();
        let records = records.into_records().records;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].stop_id, Some(RecordId::Number(1)));
        assert_eq!(records[1].stop_id, Some(RecordId::Text("2".into())));
        assert_eq!(records[1].zone, None);
    }

    #[test]
    fn parse_keyed_shape_fills_code_from_key() {
        let json = r#"{
            "NDLS": {"stop_id": 1, "stop_name": "New Delhi", "zone": "NR"},
            "BCT": {"stop_id": 2, "stop_name": "Mumbai Central", "stop_code": "BCT"}
        }"#;
        let records: StationRecords = serde_json::from_str(json).unwrap();
        let records = records.into_records().records;

        // Ordered by key
        assert_eq!(records[0].stop_code.as_deref(), Some("BCT"));
        assert_eq!(records[1].stop_code.as_deref(), Some("NDLS"));
        assert_eq!(records[1].stop_name.as_deref(), Some("New Delhi"));
    }

    #[test]
    fn bad_record_does_not_sink_the_rest() {
        let json = r#"[
            {"stop_id": 1, "stop_name": "New Delhi", "stop_code": "NDLS", "zone": "NR"},
            {"stop_id": 2, "stop_name": "Bad Halt", "stop_code": 123},
            {"stop_id": 2.5, "stop_name": "Fractional Halt", "stop_code": "FRH"},
            "not a record",
            {"stop_id": "5", "stop_name": "Mumbai Central", "stop_code": "BCT"}
        ]"#;
        let source: StationRecords = serde_json::from_str(json).unwrap();

        let decoded = source.clone().into_records();
        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.malformed, 3);

        let catalog = Catalog::from_source(source);
        let codes: Vec<&str> = catalog.iter().map(Station::code).collect();
        assert_eq!(codes, vec!["NDLS", "BCT"]);
    }

    #[test]
    fn bad_keyed_record_is_skipped() {
        let json = r#"{
            "NDLS": {"stop_id": 1, "stop_name": "New Delhi"},
            "XXX": {"stop_id": 2, "stop_name": ["not", "a", "name"]},
            "MAS": 42
        }"#;
        let source: StationRecords = serde_json::from_str(json).unwrap();
        let catalog = Catalog::from_source(source);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get_by_code("ndls").unwrap().name(), "New Delhi");
    }

    #[test]
    fn typed_records_build_a_document() {
        let source = StationRecords::from_records(vec![record(
            1,
            Some("New Delhi"),
            Some("NDLS"),
            Some("NR"),
        )]);
        assert_eq!(Catalog::from_source(source).len(), 1);
    }

    #[test]
    fn from_records_drops_nameless() {
        let catalog = Catalog::from_records(vec![
            record(1, Some("New Delhi"), Some("NDLS"), Some("NR")),
            record(2, None, Some("XXX"), None),
            record(3, Some("  "), Some("YYY"), None),
            record(4, Some("Wayside Halt"), None, None),
        ]);

        assert_eq!(catalog.len(), 2);
        let names: Vec<&str> = catalog.iter().map(Station::name).collect();
        assert_eq!(names, vec!["New Delhi", "Wayside Halt"]);

        let halt = catalog.iter().nth(1).unwrap();
        assert_eq!(halt.code(), "");
        assert_eq!(halt.zone(), UNKNOWN_ZONE);
    }

    #[test]
    fn missing_id_uses_position() {
        let catalog = Catalog::from_records(vec![StationRecord {
            stop_name: Some("Pune Junction".into()),
            stop_code: Some("PUNE".into()),
            ..Default::default()
        }]);
        assert_eq!(catalog.iter().next().unwrap().id(), "0");
    }

    #[test]
    fn get_by_code_ignores_case() {
        let catalog = Catalog::from_records(vec![
            record(1, Some("New Delhi"), Some("NDLS"), Some("NR")),
            record(2, Some("Wayside Halt"), None, None),
        ]);

        assert_eq!(catalog.get_by_code("ndls").unwrap().name(), "New Delhi");
        assert!(catalog.get_by_code("MAS").is_none());
        // An empty code never matches the station with no code
        assert!(catalog.get_by_code("").is_none());
    }

    #[test]
    fn get_by_id() {
        let catalog = Catalog::from_records(vec![record(
            42,
            Some("Howrah"),
            Some("HWH"),
            Some("ER"),
        )]);
        assert_eq!(catalog.get_by_id("42").unwrap().code(), "HWH");
        assert!(catalog.get_by_id("7").is_none());
    }

    #[test]
    fn in_zone_filters() {
        let catalog = Catalog::from_records(vec![
            record(1, Some("New Delhi"), Some("NDLS"), Some("NR")),
            record(2, Some("Mumbai Central"), Some("BCT"), Some("WR")),
            record(3, Some("Ambala Cantt"), Some("UMB"), Some("nr")),
        ]);

        let nr: Vec<&str> = catalog.in_zone("NR").iter().map(|s| s.code()).collect();
        assert_eq!(nr, vec!["NDLS", "UMB"]);
        assert!(catalog.in_zone("SR").is_empty());
    }
}
