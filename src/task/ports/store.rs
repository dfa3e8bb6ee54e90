//! Store port for task and decision-log persistence.

use crate::task::domain::{DecisionLog, NewDecisionLog, NewTask, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Persistence contract for tasks and decision logs.
///
/// Implementations own handle assignment: drafts go in, records with stable
/// integer handles come out. Batch operations are applied as a single
/// durable unit, so a mid-write failure never leaves one part of the batch
/// applied and the rest not.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task and assigns its handle.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the write fails.
    async fn add_task(&self, draft: &NewTask) -> TaskStoreResult<Task>;

    /// Stores a batch of new tasks as one durable unit, in draft order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the write fails; no
    /// draft from the batch is persisted in that case.
    async fn add_tasks(&self, drafts: &[NewTask]) -> TaskStoreResult<Vec<Task>>;

    /// Finds a task by handle.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Persists changes to an existing task (urgency, status, definition).
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update_task(&self, task: &Task) -> TaskStoreResult<()>;

    /// Deletes a task record.
    ///
    /// Deleting an absent task is a no-op: dismissal may race a concurrent
    /// removal in the same triage pass.
    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Returns all pending tasks in insertion order.
    async fn pending_tasks(&self) -> TaskStoreResult<Vec<Task>>;

    /// Counts pending tasks.
    async fn pending_count(&self) -> TaskStoreResult<u64>;

    /// Persists an urgency split as one durable unit: every task in
    /// `urgent` gets `is_urgent = true`, every task in `non_urgent` gets
    /// `is_urgent = false`. Handles referencing deleted tasks are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the write fails; neither
    /// group is applied in that case.
    async fn apply_urgency(&self, urgent: &[TaskId], non_urgent: &[TaskId])
    -> TaskStoreResult<()>;

    /// Appends a decision log entry and assigns its handle.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the write fails.
    async fn append_log(&self, draft: &NewDecisionLog) -> TaskStoreResult<DecisionLog>;

    /// Returns all log entries referencing a task, oldest first.
    async fn logs_for_task(&self, task_id: TaskId) -> TaskStoreResult<Vec<DecisionLog>>;

    /// Returns the most recent log entries by selection time, newest first.
    async fn recent_logs(&self, limit: u32) -> TaskStoreResult<Vec<DecisionLog>>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
