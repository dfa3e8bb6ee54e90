//! Task aggregate root and related lifecycle types.

use super::{ParseTaskStatusError, TaskDomainError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been captured but not yet acted on.
    Pending,
    /// Task carries a done-definition and is being executed.
    Active,
    /// Task execution has finished.
    Completed,
    /// Task was discarded during urgency triage.
    Dismissed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Dismissed => "dismissed",
        }
    }

    /// Returns whether a forward transition from `self` to `to` is allowed.
    ///
    /// Statuses only move along `pending -> active -> completed` or
    /// `pending -> dismissed`; nothing moves backwards and terminal statuses
    /// never change.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Active)
                | (Self::Pending, Self::Dismissed)
                | (Self::Active, Self::Completed)
        )
    }

    /// Returns whether the status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Dismissed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "dismissed" => Ok(Self::Dismissed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Non-empty, trimmed task text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskText(String);

impl TaskText {
    /// Creates validated task text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskText`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTaskText);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the text as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome-based completion criterion attached before execution starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoneDefinition(String);

impl DoneDefinition {
    /// Minimum character count after trimming.
    pub const MIN_LENGTH: usize = 5;

    /// Creates a validated done-definition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DoneDefinitionTooShort`] when the trimmed
    /// value is shorter than [`Self::MIN_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let length = trimmed.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(TaskDomainError::DoneDefinitionTooShort {
                length,
                minimum: Self::MIN_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the definition as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DoneDefinition {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DoneDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unpersisted task draft; the store assigns the handle on insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    text: TaskText,
    is_urgent: bool,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a pending, non-urgent draft stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskText`] when the text is empty
    /// after trimming.
    pub fn new(text: impl Into<String>, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        Ok(Self {
            text: TaskText::new(text)?,
            is_urgent: false,
            created_at: clock.utc(),
        })
    }

    /// Creates a draft pre-marked urgent, as quick capture does.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskText`] when the text is empty
    /// after trimming.
    pub fn urgent(text: impl Into<String>, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        Ok(Self {
            text: TaskText::new(text)?,
            is_urgent: true,
            created_at: clock.utc(),
        })
    }

    /// Returns the draft text.
    #[must_use]
    pub const fn text(&self) -> &TaskText {
        &self.text
    }

    /// Returns the draft urgency flag.
    #[must_use]
    pub const fn is_urgent(&self) -> bool {
        self.is_urgent
    }

    /// Returns the draft creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task handle.
    pub id: TaskId,
    /// Persisted task text.
    pub text: TaskText,
    /// Persisted urgency flag.
    pub is_urgent: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted done-definition, if one was attached.
    pub done_definition: Option<DoneDefinition>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    text: TaskText,
    is_urgent: bool,
    created_at: DateTime<Utc>,
    status: TaskStatus,
    done_definition: Option<DoneDefinition>,
}

impl Task {
    /// Materializes a stored draft under the handle the store assigned.
    #[must_use]
    pub fn from_draft(id: TaskId, draft: NewTask) -> Self {
        Self {
            id,
            text: draft.text,
            is_urgent: draft.is_urgent,
            created_at: draft.created_at,
            status: TaskStatus::Pending,
            done_definition: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            text: data.text,
            is_urgent: data.is_urgent,
            created_at: data.created_at,
            status: data.status,
            done_definition: data.done_definition,
        }
    }

    /// Returns the task handle.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task text.
    #[must_use]
    pub const fn text(&self) -> &TaskText {
        &self.text
    }

    /// Returns whether the task was classified urgent.
    #[must_use]
    pub const fn is_urgent(&self) -> bool {
        self.is_urgent
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the done-definition, if one has been attached.
    #[must_use]
    pub const fn done_definition(&self) -> Option<&DoneDefinition> {
        self.done_definition.as_ref()
    }

    /// Records the urgency classification decided during triage.
    pub const fn set_urgency(&mut self, is_urgent: bool) {
        self.is_urgent = is_urgent;
    }

    /// Attaches the done-definition and activates the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DoneDefinitionAlreadySet`] when a
    /// definition is already attached, or
    /// [`TaskDomainError::InvalidStatusTransition`] when the task is not
    /// pending.
    pub fn attach_done_definition(
        &mut self,
        definition: DoneDefinition,
    ) -> Result<(), TaskDomainError> {
        if self.done_definition.is_some() {
            return Err(TaskDomainError::DoneDefinitionAlreadySet(self.id));
        }
        self.transition_to(TaskStatus::Active)?;
        self.done_definition = Some(definition);
        Ok(())
    }

    /// Marks execution as finished.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the task is
    /// not active.
    pub fn complete(&mut self) -> Result<(), TaskDomainError> {
        self.transition_to(TaskStatus::Completed)
    }

    fn transition_to(&mut self, to: TaskStatus) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(to) {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}
