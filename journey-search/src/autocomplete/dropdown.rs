//! Open/close state of the candidate list.
//!
//! Losing focus does not close the list straight away: it moves to
//! `PendingClose` and arms a short timer. A candidate click that arrives
//! while the close is pending is still accepted, and the close only takes
//! effect when the timer is explicitly fired. A click therefore always wins
//! over a pending close, whatever order the host delivers events in.
//!
//! The list only opens while the input has focus, so an evaluation that
//! lands after a blur never shows candidates on an unfocused field.

use std::time::Duration;

use tokio::time::Instant;

use super::timer::ScheduledTask;

/// Visible state of the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownState {
    Closed,
    Open,
    /// Focus was lost; the list closes when the deferred timer fires.
    PendingClose,
}

/// The candidate list state machine.
#[derive(Debug)]
pub struct Dropdown {
    state: DropdownState,
    focused: bool,
    close_timer: ScheduledTask<()>,
    close_delay: Duration,
}

impl Dropdown {
    /// Create a closed, unfocused dropdown that defers blur-closes by
    /// `close_delay`.
    pub fn new(close_delay: Duration) -> Self {
        Self {
            state: DropdownState::Closed,
            focused: false,
            close_timer: ScheduledTask::new(),
            close_delay,
        }
    }

    /// Current state.
    pub fn state(&self) -> DropdownState {
        self.state
    }

    /// Returns true while the input has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Returns true when candidates are visible (open or pending close).
    pub fn is_visible(&self) -> bool {
        self.state != DropdownState::Closed
    }

    /// A matcher evaluation completed.
    ///
    /// Results open a closed list if the input has focus; no results close
    /// it. A list waiting to close after focus loss stays pending.
    pub fn evaluated(&mut self, has_results: bool) {
        match (self.state, has_results) {
            (_, false) => self.close(),
            (DropdownState::Closed, true) if self.focused => self.state = DropdownState::Open,
            (_, true) => {}
        }
    }

    /// The input lost focus.
    pub fn focus_lost(&mut self, now: Instant) {
        self.focused = false;
        if self.state == DropdownState::Open {
            self.state = DropdownState::PendingClose;
            self.close_timer.schedule(now + self.close_delay, ());
        }
    }

    /// The input gained focus. A pending close is cancelled.
    pub fn focus_gained(&mut self) {
        self.focused = true;
        if self.state == DropdownState::PendingClose {
            self.close_timer.cancel();
            self.state = DropdownState::Open;
        }
    }

    /// A candidate was clicked.
    ///
    /// Accepted while the list is visible, including during a pending close.
    /// Returns false if the list was closed (there was nothing to click).
    pub fn candidate_clicked(&mut self) -> bool {
        if !self.is_visible() {
            return false;
        }
        self.close();
        true
    }

    /// Close immediately (escape, selection, clear).
    pub fn close(&mut self) {
        self.close_timer.cancel();
        self.state = DropdownState::Closed;
    }

    /// Apply the deferred close if it is due. Returns true if it closed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.close_timer.take_due(now).is_some() {
            self.state = DropdownState::Closed;
            return true;
        }
        false
    }

    /// Deadline of the deferred close, if armed.
    pub fn close_deadline(&self) -> Option<Instant> {
        self.close_timer.deadline()
    }

    /// Wait for the deferred close and apply it.
    pub async fn closed(&mut self) {
        self.close_timer.fired().await;
        self.state = DropdownState::Closed;
    }
}
