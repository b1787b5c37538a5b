//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::autocomplete::ScoredCandidate;
use crate::domain::{Journey, Station};
use crate::journeys::{FilterCriteria, Ranking, SearchRequest, SortOrder, clamp_limit};

/// A station as returned by the station endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationSummary {
    pub stop_id: String,
    pub stop_code: String,
    pub stop_name: String,
    pub zone: String,

    /// Match score, present only in search results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

impl From<&Station> for StationSummary {
    fn from(station: &Station) -> Self {
        Self {
            stop_id: station.id().to_string(),
            stop_code: station.code().to_string(),
            stop_name: station.name().to_string(),
            zone: station.zone().to_string(),
            score: None,
        }
    }
}

impl From<&ScoredCandidate> for StationSummary {
    fn from(candidate: &ScoredCandidate) -> Self {
        Self {
            score: Some(candidate.score),
            ..Self::from(&candidate.station)
        }
    }
}

/// Query for listing stations.
#[derive(Debug, Default, Deserialize)]
pub struct StationListQuery {
    /// Optional zone filter (case-insensitive)
    pub zone: Option<String>,
}

/// Query for the station autocomplete endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct StationSearchQuery {
    /// Text typed by the user
    #[serde(default)]
    pub q: String,

    /// Maximum results (capped at the candidate limit)
    pub limit: Option<usize>,
}

/// Filter and sort parameters for a journey search.
///
/// Parsed leniently: unknown values are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct JourneySearchParams {
    /// `none`, `quality`, `fastest`, `cheapest`, `transfers` or `comfort`
    pub sort_by: Option<String>,

    /// `asc` or `desc`
    pub order: Option<String>,

    /// Maximum journeys returned, clamped to `1..=50`
    pub limit: Option<String>,

    /// Maximum number of transfers
    pub max_transfers: Option<String>,

    /// Comma-separated train classes, e.g. `AC,Sleeper`
    pub classes: Option<String>,
}

impl JourneySearchParams {
    /// The filter criteria these parameters describe.
    pub fn criteria(&self) -> FilterCriteria {
        let classes = self
            .classes
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty());
        FilterCriteria::from_raw(self.max_transfers.as_deref(), classes)
    }

    /// The requested ranking.
    pub fn ranking(&self) -> Ranking {
        self.sort_by
            .as_deref()
            .map(Ranking::parse_lenient)
            .unwrap_or_default()
    }

    /// The requested direction.
    pub fn order(&self) -> SortOrder {
        self.order
            .as_deref()
            .map(SortOrder::parse_lenient)
            .unwrap_or_default()
    }

    /// The requested result count; non-numeric input means the default.
    pub fn limit(&self) -> usize {
        clamp_limit(self.limit.as_deref().and_then(|s| s.trim().parse().ok()))
    }
}

/// Details of how a journey search was answered.
#[derive(Debug, Serialize)]
pub struct SearchMetadata {
    pub query: SearchRequest,
    pub total_found: usize,
    pub returned_count: usize,
    pub sort_by: Ranking,
    pub order: SortOrder,
    pub limit: usize,
    pub filters: FilterCriteria,
}

/// Response for a journey search.
#[derive(Debug, Serialize)]
pub struct JourneySearchResponse {
    pub journeys: Vec<Journey>,
    pub metadata: SearchMetadata,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrainClass;
    use crate::journeys::{DEFAULT_LIMIT, SortKey};

    #[test]
    fn params_parse_leniently() {
        let params = JourneySearchParams {
            sort_by: Some("fare".into()),
            order: Some("upwards".into()),
            limit: Some("lots".into()),
            max_transfers: Some("many".into()),
            classes: Some("ac, Hovercraft,,sleeper".into()),
        };
        let criteria = params.criteria();
        assert_eq!(criteria.max_transfers, None);
        assert_eq!(
            criteria.classes.into_iter().collect::<Vec<_>>(),
            vec![TrainClass::Ac, TrainClass::Sleeper]
        );
        assert_eq!(params.ranking(), Ranking::Key(SortKey::Cheapest));
        assert_eq!(params.order(), SortOrder::Asc);
        assert_eq!(params.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn params_read_quality_order_and_limit() {
        let params = JourneySearchParams {
            sort_by: Some("quality".into()),
            order: Some("desc".into()),
            limit: Some("200".into()),
            ..Default::default()
        };
        assert_eq!(params.ranking(), Ranking::Quality);
        assert_eq!(params.order(), SortOrder::Desc);
        assert_eq!(params.limit(), 50);

        let params = JourneySearchParams {
            limit: Some(" 0 ".into()),
            ..Default::default()
        };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn empty_params_restrict_nothing() {
        let params = JourneySearchParams::default();
        assert!(params.criteria().is_unrestricted());
        assert_eq!(params.ranking(), Ranking::Key(SortKey::None));
        assert_eq!(params.order(), SortOrder::Asc);
    }

    #[test]
    fn summary_omits_score_outside_search() {
        let station = Station::new("3", "New Delhi", "NDLS", "NR").unwrap();
        let json = serde_json::to_value(StationSummary::from(&station)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "stop_id": "3",
                "stop_code": "NDLS",
                "stop_name": "New Delhi",
                "zone": "NR",
            })
        );
    }
}
