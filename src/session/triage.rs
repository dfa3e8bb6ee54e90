//! Urgency triage sub-flow: one binary classification per candidate.

use crate::task::domain::{Task, TaskId};

/// Front-to-back iteration over the session candidates.
///
/// Dismissals happen against the store, independently of this iterator:
/// a dismissed task keeps its slot here so the index never shifts under
/// the view, and the state machine reconciles the accumulated sets against
/// the store once triage completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrgencyTriage {
    candidates: Vec<Task>,
    index: usize,
    urgent: Vec<TaskId>,
}

impl UrgencyTriage {
    /// Starts a triage pass over the given candidates.
    #[must_use]
    pub const fn new(candidates: Vec<Task>) -> Self {
        Self {
            candidates,
            index: 0,
            urgent: Vec::new(),
        }
    }

    /// Returns the candidate currently offered for classification, or
    /// `None` once every candidate has been classified.
    #[must_use]
    pub fn current(&self) -> Option<&Task> {
        self.candidates.get(self.index)
    }

    /// Returns the 1-based position of the current candidate, for display.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.index + 1
    }

    /// Returns the total candidate count.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns whether the pass has no candidates at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns the handles of every candidate in this pass.
    #[must_use]
    pub fn candidate_ids(&self) -> Vec<TaskId> {
        self.candidates.iter().map(Task::id).collect()
    }

    /// Returns the urgent handles accumulated so far.
    #[must_use]
    pub fn urgent_ids(&self) -> &[TaskId] {
        &self.urgent
    }

    /// Classifies the current candidate and advances.
    ///
    /// Returns the full accumulated urgent set once the last candidate has
    /// been classified (including the just-classified item, if urgent), and
    /// `None` while candidates remain.
    pub fn classify(&mut self, is_urgent: bool) -> Option<Vec<TaskId>> {
        if let Some(task) = self.candidates.get(self.index) {
            if is_urgent {
                self.urgent.push(task.id());
            }
            self.index += 1;
        }
        if self.index >= self.candidates.len() {
            return Some(self.urgent.clone());
        }
        None
    }
}
