//! Station ranking for autocomplete.
//!
//! Scores every catalog station against a normalised query and returns the
//! best candidates. The scoring rule is fixed:
//!
//! | score | condition |
//! |---|---|
//! | 3 | name starts with the query |
//! | 2 | code starts with the query |
//! | 1 | name contains the query |
//!
//! Anything else is excluded. Results are ordered by score (highest first),
//! then by name length (shortest first), and capped at [`MAX_CANDIDATES`].
//!
//! Every call scans the whole catalog; there is no index. This is fine for
//! catalogs of a few thousand stations.

use crate::domain::Station;
use crate::stations::{Catalog, normalize};

/// Maximum number of candidates returned for one query.
pub const MAX_CANDIDATES: usize = 10;

const NAME_PREFIX: u8 = 3;
const CODE_PREFIX: u8 = 2;
const NAME_CONTAINS: u8 = 1;

/// A station retained by the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub station: Station,
    /// 3 = name prefix, 2 = code prefix, 1 = name substring.
    pub score: u8,
}

/// Rank catalog stations against an already-normalised query.
///
/// An empty query yields no candidates.
pub fn match_stations(normalized_query: &str, catalog: &Catalog) -> Vec<ScoredCandidate> {
    if normalized_query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(u8, usize, &Station)> = catalog
        .entries()
        .iter()
        .filter_map(|entry| {
            let score = score(normalized_query, &entry.name_key, &entry.code_key)?;
            Some((score, entry.station.name().chars().count(), &entry.station))
        })
        .collect();

    // Stable sort: exact ties keep catalog order
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    scored
        .into_iter()
        .take(MAX_CANDIDATES)
        .map(|(score, _, station)| ScoredCandidate {
            station: station.clone(),
            score,
        })
        .collect()
}

/// Normalise a raw query, then rank.
pub fn search(raw_query: &str, catalog: &Catalog) -> Vec<ScoredCandidate> {
    match_stations(&normalize(raw_query), catalog)
}

fn score(query: &str, name: &str, code: &str) -> Option<u8> {
    if name.starts_with(query) {
        Some(NAME_PREFIX)
    } else if !code.is_empty() && code.starts_with(query) {
        Some(CODE_PREFIX)
    } else if name.contains(query) {
        Some(NAME_CONTAINS)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: usize, name: &str, code: &str) -> Station {
        Station::new(id.to_string(), name, code, "WR").unwrap()
    }

    fn catalog(stations: &[(&str, &str)]) -> Catalog {
        Catalog::new(
            stations
                .iter()
                .enumerate()
                .map(|(i, (name, code))| station(i, name, code))
                .collect(),
        )
    }

    fn names(candidates: &[ScoredCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.station.name()).collect()
    }

    #[test]
    fn empty_query_yields_nothing() {
        let cat = catalog(&[("Mumbai Central", "BCT")]);
        assert!(match_stations("", &cat).is_empty());
        assert!(search("   ", &cat).is_empty());
    }

    #[test]
    fn shorter_name_wins_tie() {
        let cat = catalog(&[("Mumbai Central", "BCT"), ("Mumbai CSMT", "CSTM")]);
        let result = match_stations("mumbai", &cat);

        assert_eq!(names(&result), vec!["Mumbai CSMT", "Mumbai Central"]);
        assert!(result.iter().all(|c| c.score == 3));
    }

    #[test]
    fn scores_by_rule() {
        let cat = catalog(&[
            ("Navi Mumbai", "NVM"),
            ("Bandra Terminus", "BDTS"),
            ("Bandra", "BA"),
            ("Byculla", "BY"),
        ]);

        let result = search("B", &cat);
        let got: Vec<(&str, u8)> = result
            .iter()
            .map(|c| (c.station.name(), c.score))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Bandra", 3),
                ("Byculla", 3),
                ("Bandra Terminus", 3),
                ("Navi Mumbai", 1),
            ]
        );
    }

    #[test]
    fn code_prefix_beats_substring() {
        let cat = catalog(&[("Dadar", "DR"), ("Thane", "TNA"), ("Kurla", "CLA")]);

        let result = match_stations("cl", &cat);
        assert_eq!(names(&result), vec!["Kurla"]);
        assert_eq!(result[0].score, 2);

        let result = match_stations("a", &cat);
        // "Dadar" and "Thane" contain "a"; "Kurla" contains "a" too
        assert!(result.iter().all(|c| c.score == 1));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn name_prefix_beats_code_prefix() {
        let cat = catalog(&[("Andheri", "ADH"), ("Dahisar", "DIC"), ("Adarsh Nagar", "AHR")]);
        let result = match_stations("ad", &cat);
        assert_eq!(names(&result), vec!["Adarsh Nagar", "Andheri"]);
        assert_eq!(result[0].score, 3);
        assert_eq!(result[1].score, 2);
    }

    #[test]
    fn empty_code_never_matches() {
        let cat = catalog(&[("Wayside Halt", "")]);
        assert!(match_stations("x", &cat).is_empty());
        assert_eq!(match_stations("way", &cat).len(), 1);
    }

    #[test]
    fn caps_at_ten() {
        let stations: Vec<(String, String)> = (0..25)
            .map(|i| (format!("Station {i:02}"), format!("S{i:02}")))
            .collect();
        let refs: Vec<(&str, &str)> = stations
            .iter()
            .map(|(n, c)| (n.as_str(), c.as_str()))
            .collect();
        let cat = catalog(&refs);

        assert_eq!(match_stations("station", &cat).len(), MAX_CANDIDATES);
    }

    #[test]
    fn exact_ties_keep_catalog_order() {
        let cat = catalog(&[("Kalyan B", "KYB"), ("Kalyan A", "KYA")]);
        let result = match_stations("kalyan", &cat);
        assert_eq!(names(&result), vec!["Kalyan B", "Kalyan A"]);
    }
}
