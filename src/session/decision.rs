//! Decision sub-flow: a bounded candidate list under a 60-second countdown.

use super::phase::SessionMode;
use crate::task::domain::{Task, TaskId};

/// Seconds the user gets before the round auto-selects.
pub const DECISION_WINDOW_SECS: u16 = 60;

/// Candidates shown at most; the rest stay pending for a future session.
pub const MAX_SHOWN: usize = 5;

/// One decision round: the candidate set, the operating mode, and the
/// remaining countdown.
///
/// Only the first [`MAX_SHOWN`] candidates are selectable. The first shown
/// candidate is the implicit priority when the countdown expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRound {
    candidates: Vec<Task>,
    mode: SessionMode,
    remaining: u16,
}

impl DecisionRound {
    /// Starts a fresh round with a full countdown.
    #[must_use]
    pub const fn new(candidates: Vec<Task>, mode: SessionMode) -> Self {
        Self {
            candidates,
            mode,
            remaining: DECISION_WINDOW_SECS,
        }
    }

    /// Returns the operating mode.
    #[must_use]
    pub const fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Returns the selectable candidates, at most [`MAX_SHOWN`].
    #[must_use]
    pub fn shown(&self) -> &[Task] {
        self.candidates.get(..MAX_SHOWN).unwrap_or(&self.candidates)
    }

    /// Returns how many candidates are withheld, or `None` when every
    /// candidate is shown.
    #[must_use]
    pub fn hidden_count(&self) -> Option<usize> {
        self.candidates.len().checked_sub(MAX_SHOWN).filter(|n| *n > 0)
    }

    /// Returns the seconds left on the countdown.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u16 {
        self.remaining
    }

    /// Returns whether the given task may be selected in this round.
    #[must_use]
    pub fn is_selectable(&self, id: TaskId) -> bool {
        self.shown().iter().any(|task| task.id() == id)
    }

    /// Returns the candidate taken when the countdown expires.
    #[must_use]
    pub fn first_shown(&self) -> Option<&Task> {
        self.shown().first()
    }

    /// Advances the countdown by one second; returns `true` once expired.
    pub const fn tick(&mut self) -> bool {
        if self.remaining > 0 {
            self.remaining -= 1;
        }
        self.remaining == 0
    }

    /// Returns the round with its countdown restarted, as a remounted
    /// decision view would.
    #[must_use]
    pub const fn restarted(mut self) -> Self {
        self.remaining = DECISION_WINDOW_SECS;
        self
    }
}
