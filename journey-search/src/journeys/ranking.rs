//! Result ordering for the journey search endpoint.
//!
//! The endpoint accepts every [`SortKey`] plus an overall `quality` ranking,
//! a direction, and a result limit. Filtering still goes through
//! [`apply`], so the filter stages and their order are shared with the
//! results view.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::domain::Journey;

use super::filter::{FilterCriteria, SortKey, apply};

/// Results returned when no limit is given.
pub const DEFAULT_LIMIT: usize = 10;

/// Most results one search returns.
pub const MAX_LIMIT: usize = 50;

/// What search results are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ranking {
    /// One of the results-view keys.
    Key(SortKey),
    /// Fewest transfers, then shortest travel time, then highest comfort,
    /// then lowest fare.
    Quality,
}

impl Default for Ranking {
    fn default() -> Self {
        Ranking::Key(SortKey::None)
    }
}

impl Ranking {
    /// Parse a ranking, falling back to no sort for unknown input.
    pub fn parse_lenient(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("quality") {
            Ranking::Quality
        } else {
            Ranking::Key(SortKey::parse_lenient(s))
        }
    }

    /// Returns the ranking as used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Ranking::Key(key) => key.as_str(),
            Ranking::Quality => "quality",
        }
    }

    fn compare(&self, a: &Journey, b: &Journey) -> Ordering {
        match self {
            Ranking::Key(key) => key.compare(a, b),
            Ranking::Quality => a
                .transfers
                .cmp(&b.transfers)
                .then_with(|| a.travel_minutes().cmp(&b.travel_minutes()))
                .then_with(|| b.comfort_score.cmp(&a.comfort_score))
                .then_with(|| a.fare.total_cmp(&b.fare)),
        }
    }
}

impl fmt::Display for Ranking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Ranking {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Direction of a ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Best first under the ranking.
    #[default]
    Asc,
    /// The ranking reversed; ties keep their filtered order.
    Desc,
}

impl SortOrder {
    /// Parse a direction, falling back to ascending for unknown input.
    pub fn parse_lenient(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Clamp a requested result count into `1..=MAX_LIMIT`.
pub fn clamp_limit(requested: Option<i64>) -> usize {
    match requested {
        None => DEFAULT_LIMIT,
        Some(n) => usize::try_from(n.clamp(1, MAX_LIMIT as i64)).unwrap_or(DEFAULT_LIMIT),
    }
}

/// Filter, order and truncate `journeys` without modifying the input.
///
/// With no sort key the direction is ignored and the filtered order kept.
pub fn rank(
    journeys: &[Journey],
    criteria: &FilterCriteria,
    ranking: Ranking,
    order: SortOrder,
    limit: usize,
) -> Vec<Journey> {
    let mut kept = apply(journeys, criteria, SortKey::None);

    if ranking != Ranking::Key(SortKey::None) {
        kept.sort_by(|a, b| match order {
            SortOrder::Asc => ranking.compare(a, b),
            SortOrder::Desc => ranking.compare(b, a),
        });
    }

    kept.truncate(limit);
    kept
}
