//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task handle is not a positive integer.
    #[error("invalid task identifier {0}, expected a positive integer")]
    InvalidTaskId(i64),

    /// The log handle is not a positive integer.
    #[error("invalid log identifier {0}, expected a positive integer")]
    InvalidLogId(i64),

    /// The task text is empty after trimming.
    #[error("task text must not be empty")]
    EmptyTaskText,

    /// The done-definition is shorter than the required minimum.
    #[error("done-definition must be at least {minimum} characters, got {length}")]
    DoneDefinitionTooShort {
        /// Character count of the trimmed input.
        length: usize,
        /// Required minimum character count.
        minimum: usize,
    },

    /// A done-definition has already been attached to the task.
    #[error("done-definition already set on task {0}")]
    DoneDefinitionAlreadySet(TaskId),

    /// The requested status change is not a forward transition.
    #[error("invalid status transition for task {task_id}: {from} -> {to}")]
    InvalidStatusTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Status before the attempted transition.
        from: TaskStatus,
        /// Rejected target status.
        to: TaskStatus,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing selection methods from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown selection method: {0}")]
pub struct ParseSelectionMethodError(pub String);
