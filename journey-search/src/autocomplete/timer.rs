//! A cancellable single-slot timer.
//!
//! Holds at most one pending `(deadline, payload)`. Scheduling again
//! replaces whatever was pending, which is exactly the debounce rule: only
//! the last value scheduled inside the window is ever delivered.

use std::future;

use tokio::time::Instant;

/// At most one pending task, fired once its deadline passes.
#[derive(Debug)]
pub struct ScheduledTask<T> {
    pending: Option<(Instant, T)>,
}

impl<T> Default for ScheduledTask<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> ScheduledTask<T> {
    /// Create an idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` for `deadline`, cancelling anything pending.
    ///
    /// Returns the payload that was replaced, if any.
    pub fn schedule(&mut self, deadline: Instant, payload: T) -> Option<T> {
        self.pending.replace((deadline, payload)).map(|(_, p)| p)
    }

    /// Cancel the pending task, returning its payload.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, p)| p)
    }

    /// Returns true while a task is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending task.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(d, _)| *d)
    }

    /// Take the payload if its deadline has been reached.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((deadline, _)) if deadline <= now => self.pending.take().map(|(_, p)| p),
            _ => None,
        }
    }

    /// Wait for the pending task to fire and take its payload.
    ///
    /// Never resolves while nothing is pending. Dropping the future before it
    /// resolves leaves the task pending, so this is safe to use in
    /// `tokio::select!`.
    pub async fn fired(&mut self) -> T {
        let Some(deadline) = self.deadline() else {
            return future::pending().await;
        };
        tokio::time::sleep_until(deadline).await;

        match self.pending.take() {
            Some((_, payload)) => payload,
            None => future::pending().await,
        }
    }
}
