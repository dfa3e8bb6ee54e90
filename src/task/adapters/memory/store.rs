//! In-memory task store for tests and fast substitution.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{DecisionLog, LogId, NewDecisionLog, NewTask, Task, TaskId, TaskStatus},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Records are keyed by their raw handle in a `BTreeMap`, so iteration
/// yields insertion order for free (handles ascend monotonically).
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryState>>,
}

#[derive(Debug)]
struct InMemoryState {
    tasks: BTreeMap<i64, Task>,
    logs: BTreeMap<i64, DecisionLog>,
    next_task_id: i64,
    next_log_id: i64,
}

impl Default for InMemoryState {
    fn default() -> Self {
        Self {
            tasks: BTreeMap::new(),
            logs: BTreeMap::new(),
            next_task_id: 1,
            next_log_id: 1,
        }
    }
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write_state(
        &self,
    ) -> TaskStoreResult<std::sync::RwLockWriteGuard<'_, InMemoryState>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn read_state(&self) -> TaskStoreResult<std::sync::RwLockReadGuard<'_, InMemoryState>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

fn insert_draft(state: &mut InMemoryState, draft: &NewTask) -> TaskStoreResult<Task> {
    let raw_id = state.next_task_id;
    state.next_task_id += 1;
    let id = TaskId::new(raw_id).map_err(TaskStoreError::persistence)?;
    let task = Task::from_draft(id, draft.clone());
    state.tasks.insert(raw_id, task.clone());
    Ok(task)
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn add_task(&self, draft: &NewTask) -> TaskStoreResult<Task> {
        let mut state = self.write_state()?;
        insert_draft(&mut state, draft)
    }

    async fn add_tasks(&self, drafts: &[NewTask]) -> TaskStoreResult<Vec<Task>> {
        let mut state = self.write_state()?;
        drafts
            .iter()
            .map(|draft| insert_draft(&mut state, draft))
            .collect()
    }

    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.tasks.get(&id.value()).cloned())
    }

    async fn update_task(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.write_state()?;
        let slot = state
            .tasks
            .get_mut(&task.id().value())
            .ok_or(TaskStoreError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.write_state()?;
        state.tasks.remove(&id.value());
        Ok(())
    }

    async fn pending_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.status() == TaskStatus::Pending)
            .cloned()
            .collect())
    }

    async fn pending_count(&self) -> TaskStoreResult<u64> {
        let state = self.read_state()?;
        let count = state
            .tasks
            .values()
            .filter(|task| task.status() == TaskStatus::Pending)
            .count();
        u64::try_from(count).map_err(TaskStoreError::persistence)
    }

    async fn apply_urgency(
        &self,
        urgent: &[TaskId],
        non_urgent: &[TaskId],
    ) -> TaskStoreResult<()> {
        // One lock acquisition covers both groups, so the split is atomic.
        let mut state = self.write_state()?;
        for id in urgent {
            if let Some(task) = state.tasks.get_mut(&id.value()) {
                task.set_urgency(true);
            }
        }
        for id in non_urgent {
            if let Some(task) = state.tasks.get_mut(&id.value()) {
                task.set_urgency(false);
            }
        }
        Ok(())
    }

    async fn append_log(&self, draft: &NewDecisionLog) -> TaskStoreResult<DecisionLog> {
        let mut state = self.write_state()?;
        let raw_id = state.next_log_id;
        state.next_log_id += 1;
        let id = LogId::new(raw_id).map_err(TaskStoreError::persistence)?;
        let log = DecisionLog::from_draft(id, *draft);
        state.logs.insert(raw_id, log);
        Ok(log)
    }

    async fn logs_for_task(&self, task_id: TaskId) -> TaskStoreResult<Vec<DecisionLog>> {
        let state = self.read_state()?;
        Ok(state
            .logs
            .values()
            .filter(|log| log.task_id() == task_id)
            .copied()
            .collect())
    }

    async fn recent_logs(&self, limit: u32) -> TaskStoreResult<Vec<DecisionLog>> {
        let state = self.read_state()?;
        let mut logs: Vec<DecisionLog> = state.logs.values().copied().collect();
        logs.sort_by_key(|log| std::cmp::Reverse(log.chosen_at()));
        logs.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(logs)
    }
}
