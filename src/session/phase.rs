//! Phase variants the session moves through, each carrying only its own data.

use super::decision::DecisionRound;
use super::triage::UrgencyTriage;
use crate::task::domain::{SelectionMethod, Task};
use chrono::{DateTime, Utc};

/// Decision phase operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Choosing among tasks classified urgent this session.
    Urgent,
    /// No urgent tasks exist; choosing from the non-urgent backlog.
    Backlog,
}

/// The task committed to at the decision step, with how and when it was
/// chosen. Threaded through the gate and focus phases into the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    task: Task,
    method: SelectionMethod,
    chosen_at: DateTime<Utc>,
}

impl Selection {
    /// Records a selection made at `chosen_at`.
    #[must_use]
    pub const fn new(task: Task, method: SelectionMethod, chosen_at: DateTime<Utc>) -> Self {
        Self {
            task,
            method,
            chosen_at,
        }
    }

    /// Returns the selected task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the selection method.
    #[must_use]
    pub const fn method(&self) -> SelectionMethod {
        self.method
    }

    /// Returns the selection timestamp.
    #[must_use]
    pub const fn chosen_at(&self) -> DateTime<Utc> {
        self.chosen_at
    }

    /// Replaces the embedded task snapshot after a store write changed it.
    #[must_use]
    pub fn with_task(mut self, task: Task) -> Self {
        self.task = task;
        self
    }
}

/// Current step of the session wizard.
///
/// Each variant carries exactly the data its view needs, so there is no
/// nullable selected-task field to check across phases. Dropping a variant
/// tears its sub-flow state down with it; in particular the decision
/// countdown cannot outlive the decision phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Collecting new task texts; shows how many pending tasks already wait.
    BrainDump {
        /// Pending tasks left over from previous sessions.
        pending_count: u64,
    },
    /// Classifying each candidate as urgent or deferred, one at a time.
    Urgency {
        /// Iteration state over the session candidates.
        triage: UrgencyTriage,
    },
    /// Choosing one task from the shown candidates before the countdown
    /// expires.
    Decision {
        /// Candidate set, mode, and countdown for this round.
        round: DecisionRound,
    },
    /// Committing to a definition of done for the selected task.
    Gate {
        /// Decision round to return to on cancel.
        round: DecisionRound,
        /// The pending selection; nothing is persisted yet.
        selection: Selection,
    },
    /// Executing the activated task.
    Focus {
        /// The active selection being executed.
        selection: Selection,
    },
    /// Nothing urgent and no backlog; the session has nothing to offer.
    AllDone,
}

impl Phase {
    /// Returns a short name for diagnostics and error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BrainDump { .. } => "brain_dump",
            Self::Urgency { .. } => "urgency",
            Self::Decision { .. } => "decision",
            Self::Gate { .. } => "gate",
            Self::Focus { .. } => "focus",
            Self::AllDone => "all_done",
        }
    }
}
