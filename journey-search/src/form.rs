//! The journey search form.
//!
//! The form owns the origin and destination bindings. Station fields ask
//! for changes through [`FieldEvent`]s and the form decides whether to
//! apply them; after any change the caller re-syncs the affected field
//! from [`SearchForm::binding`].

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::debug;

use crate::autocomplete::{FieldEvent, SelectionBinding};
use crate::domain::SelectedStation;
use crate::journeys::{RequestError, SearchRequest};

/// Which station input an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationRole {
    Origin,
    Destination,
}

impl StationRole {
    fn field_name(self) -> &'static str {
        match self {
            StationRole::Origin => "origin",
            StationRole::Destination => "destination",
        }
    }
}

/// A user choice forwarded to the navigation/selection consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// A journey was picked from the results.
    Journey { train_number: String },
    /// A station was bound to an input.
    Station(SelectedStation),
}

/// Origin, destination, date and time of a journey search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    origin: SelectionBinding,
    destination: SelectionBinding,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchForm {
    /// An empty form. Both stations are required.
    pub fn new() -> Self {
        Self {
            origin: SelectionBinding::new(true),
            destination: SelectionBinding::new(true),
            date: None,
            time: None,
        }
    }

    /// The binding for one input.
    pub fn binding(&self, role: StationRole) -> &SelectionBinding {
        match role {
            StationRole::Origin => &self.origin,
            StationRole::Destination => &self.destination,
        }
    }

    fn binding_mut(&mut self, role: StationRole) -> &mut SelectionBinding {
        match role {
            StationRole::Origin => &mut self.origin,
            StationRole::Destination => &mut self.destination,
        }
    }

    fn other(&self, role: StationRole) -> &SelectionBinding {
        match role {
            StationRole::Origin => &self.destination,
            StationRole::Destination => &self.origin,
        }
    }

    /// Apply a request from the field for `role`.
    ///
    /// A selection is rejected when the same station is already bound to
    /// the other input. Returns the selection event to forward, if any.
    pub fn apply(&mut self, role: StationRole, event: &FieldEvent) -> Option<SelectionEvent> {
        match event {
            FieldEvent::SelectionRequested(selected) => {
                if self.other(role).value().is_some_and(|v| v.id == selected.id) {
                    debug!(
                        field = role.field_name(),
                        code = %selected.code,
                        "rejected selection already used by the other station"
                    );
                    return None;
                }
                self.binding_mut(role).assign(Some(selected.clone()));
                Some(SelectionEvent::Station(selected.clone()))
            }
            FieldEvent::ClearRequested => {
                self.binding_mut(role).clear();
                None
            }
            FieldEvent::Evaluated { .. } | FieldEvent::Opened | FieldEvent::Closed => None,
        }
    }

    /// Exchange origin and destination.
    pub fn swap(&mut self) {
        let origin = self.origin.take();
        let destination = self.destination.take();
        self.origin.assign(destination);
        self.destination.assign(origin);
    }

    /// Set the travel date.
    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
    }

    /// Set the earliest departure time; `None` uses the default.
    pub fn set_time(&mut self, time: Option<NaiveTime>) {
        self.time = time;
    }

    /// Returns true when both stations and a date are set.
    pub fn is_complete(&self) -> bool {
        self.origin.is_valid() && self.destination.is_valid() && self.date.is_some()
    }

    /// Validate the form and build the search to forward to the results view.
    pub fn submit(&self, today: NaiveDate, now: NaiveTime) -> Result<SearchRequest, RequestError> {
        let origin = self.required(StationRole::Origin)?;
        let destination = self.required(StationRole::Destination)?;
        let date = self.date.ok_or(RequestError::MissingDate)?;

        SearchRequest::new(&origin.code, &destination.code, date, self.time, today, now)
    }

    fn required(&self, role: StationRole) -> Result<&SelectedStation, RequestError> {
        let field = role.field_name();
        let station = self
            .binding(role)
            .value()
            .ok_or(RequestError::MissingStation { field })?;
        if station.code.trim().is_empty() {
            return Err(RequestError::StationWithoutCode { field });
        }
        Ok(station)
    }
}
