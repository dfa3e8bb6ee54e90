//! Append-only decision log recording what was selected and when.

use super::{LogId, ParseSelectionMethodError, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a task was selected out of the decision candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMethod {
    /// The user clicked a candidate before the countdown expired.
    Manual,
    /// The countdown expired and the first shown candidate was taken.
    Auto,
}

impl SelectionMethod {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for SelectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SelectionMethod {
    type Error = ParseSelectionMethodError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "manual" => Ok(Self::Manual),
            "auto" => Ok(Self::Auto),
            _ => Err(ParseSelectionMethodError(value.to_owned())),
        }
    }
}

/// Unpersisted log draft; the store assigns the handle on append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewDecisionLog {
    task_id: TaskId,
    chosen_at: DateTime<Utc>,
    method: SelectionMethod,
    completed_at: Option<DateTime<Utc>>,
}

impl NewDecisionLog {
    /// Creates a log draft for a selection.
    #[must_use]
    pub const fn new(task_id: TaskId, method: SelectionMethod, chosen_at: DateTime<Utc>) -> Self {
        Self {
            task_id,
            chosen_at,
            method,
            completed_at: None,
        }
    }

    /// Sets the execution-finished timestamp.
    #[must_use]
    pub const fn with_completed_at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    /// Returns the referenced task handle.
    #[must_use]
    pub const fn task_id(self) -> TaskId {
        self.task_id
    }

    /// Returns the selection timestamp.
    #[must_use]
    pub const fn chosen_at(self) -> DateTime<Utc> {
        self.chosen_at
    }

    /// Returns the selection method.
    #[must_use]
    pub const fn method(self) -> SelectionMethod {
        self.method
    }

    /// Returns the execution-finished timestamp, if set.
    #[must_use]
    pub const fn completed_at(self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}

/// Persisted decision log entry.
///
/// Entries reference a task without owning it and are never mutated after
/// being appended; they outlive the task's presence in any active view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionLog {
    id: LogId,
    task_id: TaskId,
    chosen_at: DateTime<Utc>,
    method: SelectionMethod,
    completed_at: Option<DateTime<Utc>>,
}

impl DecisionLog {
    /// Materializes a stored draft under the handle the store assigned.
    #[must_use]
    pub const fn from_draft(id: LogId, draft: NewDecisionLog) -> Self {
        Self {
            id,
            task_id: draft.task_id,
            chosen_at: draft.chosen_at,
            method: draft.method,
            completed_at: draft.completed_at,
        }
    }

    /// Returns the log handle.
    #[must_use]
    pub const fn id(self) -> LogId {
        self.id
    }

    /// Returns the referenced task handle.
    #[must_use]
    pub const fn task_id(self) -> TaskId {
        self.task_id
    }

    /// Returns the selection timestamp.
    #[must_use]
    pub const fn chosen_at(self) -> DateTime<Utc> {
        self.chosen_at
    }

    /// Returns the selection method.
    #[must_use]
    pub const fn method(self) -> SelectionMethod {
        self.method
    }

    /// Returns the execution-finished timestamp, if set.
    #[must_use]
    pub const fn completed_at(self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}
