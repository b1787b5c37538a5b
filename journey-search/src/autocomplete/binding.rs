//! The bound value of a station input.

use crate::domain::{SelectedStation, Station};

/// Owns the chosen station and the text shown in its input.
///
/// The display text always mirrors the bound value: `"<name> (<code>)"`
/// when a station is selected, empty otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionBinding {
    value: Option<SelectedStation>,
    display_text: String,
    required: bool,
}

impl SelectionBinding {
    /// Create an empty binding.
    pub fn new(required: bool) -> Self {
        Self {
            value: None,
            display_text: String::new(),
            required,
        }
    }

    /// The bound value (`None` means no selection).
    pub fn value(&self) -> Option<&SelectedStation> {
        self.value.as_ref()
    }

    /// Text to show in the input.
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// Whether a selection is required for the form to be valid.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Bind a station chosen from the candidate list.
    pub fn select(&mut self, station: &Station) {
        self.assign(Some(SelectedStation::from(station)));
    }

    /// Remove the selection.
    pub fn clear(&mut self) {
        self.assign(None);
    }

    /// Replace the bound value from outside (e.g. an origin/destination
    /// swap) and resynchronise the display text.
    pub fn assign(&mut self, value: Option<SelectedStation>) {
        self.display_text = value
            .as_ref()
            .map(SelectedStation::display_label)
            .unwrap_or_default();
        self.value = value;
    }

    /// Take the bound value, leaving the binding empty.
    pub fn take(&mut self) -> Option<SelectedStation> {
        let value = self.value.take();
        self.display_text.clear();
        value
    }

    /// Required bindings are valid only with a selection; optional ones are
    /// always valid.
    pub fn is_valid(&self) -> bool {
        !self.required || self.value.is_some()
    }
}
