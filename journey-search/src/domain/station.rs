//! Station types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A station from the catalog.
///
/// Stations are immutable once loaded. The name is guaranteed non-empty by
/// construction. The code may be empty when the source record carried none;
/// an empty code never matches a query.
///
/// # Examples
///
/// ```
/// use journey_search::domain::Station;
///
/// let bct = Station::new("1", "Mumbai Central", "BCT", "WR").unwrap();
/// assert_eq!(bct.display_label(), "Mumbai Central (BCT)");
///
/// // Blank names are rejected
/// assert!(Station::new("2", "   ", "XYZ", "WR").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    id: String,
    name: String,
    code: String,
    zone: String,
}

impl Station {
    /// Create a station, trimming surrounding whitespace from every field.
    pub fn new(
        id: impl Into<String>,
        name: impl AsRef<str>,
        code: impl AsRef<str>,
        zone: impl AsRef<str>,
    ) -> Result<Self, DomainError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(DomainError::EmptyStationName);
        }

        Ok(Self {
            id: id.into(),
            name: name.to_string(),
            code: code.as_ref().trim().to_string(),
            zone: zone.as_ref().trim().to_string(),
        })
    }

    /// Returns the station identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the station name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the short station code (may be empty).
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the railway zone.
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Text shown in the input once this station is chosen.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

/// The bound value of a station input.
///
/// A subset of [`Station`]; `None` at the use site means "no selection".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedStation {
    pub id: String,
    pub code: String,
    pub name: String,
}

impl SelectedStation {
    /// Text shown in the input for this value: `"<name> (<code>)"`.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

impl From<&Station> for SelectedStation {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id.clone(),
            code: station.code.clone(),
            name: station.name.clone(),
        }
    }
}

impl fmt::Display for SelectedStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}
