//! Error types for session state machine operations.

use crate::task::domain::{TaskDomainError, TaskId};
use crate::task::ports::TaskStoreError;
use thiserror::Error;

/// Errors returned by session operations.
///
/// Any error leaves the current phase unchanged; failures are scoped to the
/// interaction that raised them.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// The event is not accepted in the current phase.
    #[error("event {event} not allowed in phase {phase}")]
    EventNotAllowed {
        /// Phase the machine was in.
        phase: &'static str,
        /// Rejected event.
        event: &'static str,
    },

    /// The selected task is not among the shown decision candidates.
    #[error("task {0} is not selectable in this round")]
    NotSelectable(TaskId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}
