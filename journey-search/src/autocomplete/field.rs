//! A station input: debounced matching, candidate list and selection
//! requests.
//!
//! The field never writes the bound value itself. Picking or clearing
//! produces a [`FieldEvent`] that the owning form applies to its
//! [`SelectionBinding`]; the form then calls [`StationField::sync`] so the
//! input shows the binding's display text. Syncing never schedules a
//! matcher run, so there is no feedback loop between the two.

use std::sync::Arc;

use tokio::time::Instant;
use tracing::debug;

use crate::domain::SelectedStation;
use crate::stations::{Catalog, normalize};

use super::binding::SelectionBinding;
use super::config::AutocompleteConfig;
use super::dropdown::{Dropdown, DropdownState};
use super::matcher::{ScoredCandidate, match_stations};
use super::timer::ScheduledTask;

/// Something the owner of a field may want to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The matcher ran for the (normalised) debounced query.
    Evaluated { query: String, count: usize },
    /// The candidate list became visible.
    Opened,
    /// The candidate list was hidden.
    Closed,
    /// The user picked a candidate; the owner should bind it.
    SelectionRequested(SelectedStation),
    /// The user cleared the input; the owner should unbind.
    ClearRequested,
}

enum Fired {
    Debounce(String),
    Close,
}

/// One station autocomplete input.
#[derive(Debug)]
pub struct StationField {
    catalog: Arc<Catalog>,
    config: AutocompleteConfig,
    input: String,
    debounce: ScheduledTask<String>,
    debounced_query: String,
    candidates: Vec<ScoredCandidate>,
    dropdown: Dropdown,
    highlighted: Option<usize>,
    evaluations: usize,
}

impl StationField {
    /// Create an empty field over `catalog`.
    pub fn new(catalog: Arc<Catalog>, config: AutocompleteConfig) -> Self {
        let dropdown = Dropdown::new(config.blur_close_delay);
        Self {
            catalog,
            config,
            input: String::new(),
            debounce: ScheduledTask::new(),
            debounced_query: String::new(),
            candidates: Vec::new(),
            dropdown,
            highlighted: None,
            evaluations: 0,
        }
    }

    /// Text currently in the input.
    pub fn input_text(&self) -> &str {
        &self.input
    }

    /// The normalised query of the last evaluation.
    pub fn debounced_query(&self) -> &str {
        &self.debounced_query
    }

    /// Candidates shown to the user; empty while the list is closed.
    pub fn visible_candidates(&self) -> &[ScoredCandidate] {
        if self.dropdown.is_visible() {
            &self.candidates
        } else {
            &[]
        }
    }

    /// State of the candidate list.
    pub fn dropdown_state(&self) -> DropdownState {
        self.dropdown.state()
    }

    /// Index of the keyboard-highlighted candidate.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// How many times the matcher has run.
    pub fn evaluation_count(&self) -> usize {
        self.evaluations
    }

    /// Returns true while a debounced evaluation is waiting.
    pub fn has_pending_evaluation(&self) -> bool {
        self.debounce.is_pending()
    }

    /// The user edited the input. Restarts the quiet window.
    ///
    /// Typing implies the input has focus.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.dropdown.focus_gained();
        let text = text.into();
        self.input.clone_from(&text);
        self.debounce.schedule(now + self.config.quiet_window, text);
    }

    /// Fire whichever timers are due at `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<FieldEvent> {
        let mut events = Vec::new();

        if let Some(raw) = self.debounce.take_due(now) {
            self.evaluate(&raw, &mut events);
        }

        if self.dropdown.poll(now) {
            self.highlighted = None;
            events.push(FieldEvent::Closed);
        }

        events
    }

    /// Wait for the next timer (debounce or deferred close) and fire it.
    ///
    /// Never resolves while no timer is armed.
    pub async fn tick(&mut self) -> Vec<FieldEvent> {
        let fired = tokio::select! {
            raw = self.debounce.fired() => Fired::Debounce(raw),
            () = self.dropdown.closed() => Fired::Close,
        };

        let mut events = Vec::new();
        match fired {
            Fired::Debounce(raw) => self.evaluate(&raw, &mut events),
            Fired::Close => {
                self.highlighted = None;
                events.push(FieldEvent::Closed);
            }
        }
        events
    }

    fn evaluate(&mut self, raw: &str, events: &mut Vec<FieldEvent>) {
        let query = normalize(raw);
        self.candidates = match_stations(&query, &self.catalog);
        self.evaluations += 1;
        self.highlighted = None;

        debug!(
            query = %query,
            candidates = self.candidates.len(),
            "station query evaluated"
        );

        let was_visible = self.dropdown.is_visible();
        self.dropdown.evaluated(!self.candidates.is_empty());

        events.push(FieldEvent::Evaluated {
            query: query.clone(),
            count: self.candidates.len(),
        });
        match (was_visible, self.dropdown.is_visible()) {
            (false, true) => events.push(FieldEvent::Opened),
            (true, false) => events.push(FieldEvent::Closed),
            _ => {}
        }

        self.debounced_query = query;
    }

    /// The input lost focus. The list closes after the blur delay.
    pub fn focus_lost(&mut self, now: Instant) {
        self.dropdown.focus_lost(now);
    }

    /// The input regained focus.
    pub fn focus_gained(&mut self) {
        self.dropdown.focus_gained();
    }

    /// The user clicked the candidate at `index`.
    ///
    /// Honoured while the list is visible, including after focus loss but
    /// before the deferred close fires.
    pub fn click(&mut self, index: usize) -> Option<FieldEvent> {
        let selected = SelectedStation::from(&self.candidates.get(index)?.station);
        if !self.dropdown.candidate_clicked() {
            return None;
        }

        self.debounce.cancel();
        self.highlighted = None;
        debug!(code = %selected.code, "station candidate picked");
        Some(FieldEvent::SelectionRequested(selected))
    }

    /// Move the highlight down, wrapping at the end.
    pub fn highlight_next(&mut self) {
        let len = self.visible_candidates().len();
        if len == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) => (i + 1) % len,
            None => 0,
        });
    }

    /// Move the highlight up, wrapping at the start.
    pub fn highlight_prev(&mut self) {
        let len = self.visible_candidates().len();
        if len == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        });
    }

    /// Pick the highlighted candidate (enter key).
    pub fn confirm_highlighted(&mut self) -> Option<FieldEvent> {
        self.click(self.highlighted?)
    }

    /// Hide the list without selecting (escape key).
    pub fn dismiss(&mut self) -> Option<FieldEvent> {
        if !self.dropdown.is_visible() {
            return None;
        }
        self.dropdown.close();
        self.highlighted = None;
        Some(FieldEvent::Closed)
    }

    /// The user cleared the input. The list stays closed.
    pub fn clear(&mut self) -> FieldEvent {
        self.input.clear();
        self.debounce.cancel();
        self.candidates.clear();
        self.dropdown.close();
        self.highlighted = None;
        FieldEvent::ClearRequested
    }

    /// Show the binding's display text without re-running the matcher.
    pub fn sync(&mut self, binding: &SelectionBinding) {
        self.debounce.cancel();
        self.input = binding.display_text().to_string();
    }
}
