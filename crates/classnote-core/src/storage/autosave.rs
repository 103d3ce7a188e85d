//! Debounced save scheduling.
//!
//! Every mutation reschedules the save instead of stacking saves, so a
//! burst of edits produces a single write once the board has been quiet
//! for the debounce window. Time is passed in explicitly so tests can
//! drive the clock.

use std::time::{Duration, Instant};

/// Quiet period after the last mutation before a save fires.
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(700);

/// Coalescing save timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Autosave {
    deadline: Option<Instant>,
}

impl Autosave {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the pending save out to `now + SAVE_DEBOUNCE`, replacing any
    /// earlier deadline.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + SAVE_DEBOUNCE);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has elapsed. Returns true exactly once
    /// per elapsed schedule.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending save, regardless of deadline. Returns whether one
    /// was pending.
    pub fn take_pending(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}
