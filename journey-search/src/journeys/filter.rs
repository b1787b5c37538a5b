//! Journey filter and sort pipeline.
//!
//! A pure function over a journey list. Stages always run in this order:
//!
//! 1. transfer limit
//! 2. train class
//! 3. sort
//!
//! Sorting is stable, so journeys that compare equal keep the order they
//! had after filtering. Re-applying the same criteria to an output gives
//! the same output.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Journey, TrainClass};

/// User-chosen filters. The default restricts nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Upper bound on transfers; `None` means no bound.
    pub max_transfers: Option<u32>,
    /// Allowed classes; empty means every class.
    pub classes: BTreeSet<TrainClass>,
}

impl FilterCriteria {
    /// Build criteria from loosely-typed input.
    ///
    /// A `max_transfers` that is not a non-negative integer, and class names
    /// that are not recognised, are ignored rather than rejected.
    pub fn from_raw<'a>(
        max_transfers: Option<&str>,
        classes: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            max_transfers: max_transfers.and_then(|s| s.trim().parse().ok()),
            classes: classes
                .into_iter()
                .filter_map(|c| c.parse().ok())
                .collect(),
        }
    }

    /// Returns true when no filter is active.
    pub fn is_unrestricted(&self) -> bool {
        self.max_transfers.is_none() && self.classes.is_empty()
    }

    fn allows_transfers(&self, journey: &Journey) -> bool {
        self.max_transfers.is_none_or(|max| journey.transfers <= max)
    }

    fn allows_class(&self, journey: &Journey) -> bool {
        self.classes.is_empty() || self.classes.contains(&journey.train_class)
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Keep the order produced by filtering.
    #[default]
    None,
    /// Shortest travel time first.
    Fastest,
    /// Lowest fare first.
    Cheapest,
    /// Fewest transfers first.
    Transfers,
    /// Highest comfort score first.
    Comfort,
}

/// Error returned when parsing an unknown sort key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(String);

impl SortKey {
    /// Returns the key as used in query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::Fastest => "fastest",
            SortKey::Cheapest => "cheapest",
            SortKey::Transfers => "transfers",
            SortKey::Comfort => "comfort",
        }
    }

    /// Compare two journeys under this key.
    ///
    /// [`SortKey::None`] treats every pair as equal.
    pub fn compare(&self, a: &Journey, b: &Journey) -> Ordering {
        match self {
            SortKey::None => Ordering::Equal,
            SortKey::Fastest => a.travel_minutes().cmp(&b.travel_minutes()),
            SortKey::Cheapest => a.fare.total_cmp(&b.fare),
            SortKey::Transfers => a.transfers.cmp(&b.transfers),
            SortKey::Comfort => b.comfort_score.cmp(&a.comfort_score),
        }
    }

    /// Parse a sort key, falling back to [`SortKey::None`] for unknown input.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    /// Accepts the key names plus the aliases `time` and `fare`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(SortKey::None),
            "fastest" | "time" => Ok(SortKey::Fastest),
            "cheapest" | "fare" => Ok(SortKey::Cheapest),
            "transfers" => Ok(SortKey::Transfers),
            "comfort" => Ok(SortKey::Comfort),
            _ => Err(UnknownSortKey(s.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter and sort `journeys` without modifying the input.
pub fn apply(journeys: &[Journey], criteria: &FilterCriteria, sort: SortKey) -> Vec<Journey> {
    let mut kept: Vec<Journey> = journeys
        .iter()
        .filter(|j| criteria.allows_transfers(j))
        .filter(|j| criteria.allows_class(j))
        .cloned()
        .collect();

    if sort != SortKey::None {
        kept.sort_by(|a, b| sort.compare(a, b));
    }

    kept
}
