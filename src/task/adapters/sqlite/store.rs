//! `SQLite` store implementation for task and decision-log persistence.

use super::{
    models::{LogRow, NewLogRow, NewTaskRow, TaskRow},
    schema::{logs, tasks},
};
use crate::task::{
    domain::{
        DecisionLog, DoneDefinition, LogId, NewDecisionLog, NewTask, PersistedTaskData,
        SelectionMethod, Task, TaskId, TaskStatus, TaskText,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;

/// `SQLite` connection pool type used by the task store.
pub type TaskSqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Schema DDL applied by [`SqliteTaskStore::initialize`].
///
/// Indexes mirror the persisted-schema contract: tasks by status, urgency
/// flag, and creation time; logs by referenced task and selection time.
const SCHEMA_DDL: &str = "
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL,
    is_urgent BOOLEAN NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    status TEXT NOT NULL,
    done_definition TEXT
);
CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
CREATE INDEX IF NOT EXISTS idx_tasks_is_urgent ON tasks(is_urgent);
CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at);
CREATE TABLE IF NOT EXISTS logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    task_id INTEGER NOT NULL,
    chosen_at TEXT NOT NULL,
    method TEXT NOT NULL,
    completed_at TEXT
);
CREATE INDEX IF NOT EXISTS idx_logs_task_id ON logs(task_id);
CREATE INDEX IF NOT EXISTS idx_logs_chosen_at ON logs(chosen_at);
";

/// `SQLite`-backed task store.
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    pool: TaskSqlitePool,
}

impl SqliteTaskStore {
    /// Creates a new store from a `SQLite` connection pool.
    #[must_use]
    pub const fn new(pool: TaskSqlitePool) -> Self {
        Self { pool }
    }

    /// Applies the schema DDL, creating tables and indexes if absent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the DDL cannot be
    /// applied.
    pub async fn initialize(&self) -> TaskStoreResult<()> {
        self.run_blocking(move |connection| {
            connection
                .batch_execute(SCHEMA_DDL)
                .map_err(TaskStoreError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn add_task(&self, draft: &NewTask) -> TaskStoreResult<Task> {
        let row = to_new_task_row(draft);
        self.run_blocking(move |connection| {
            let inserted: TaskRow = diesel::insert_into(tasks::table)
                .values(&row)
                .returning(TaskRow::as_returning())
                .get_result(connection)
                .map_err(TaskStoreError::persistence)?;
            row_to_task(inserted)
        })
        .await
    }

    async fn add_tasks(&self, drafts: &[NewTask]) -> TaskStoreResult<Vec<Task>> {
        let rows: Vec<NewTaskRow> = drafts.iter().map(to_new_task_row).collect();
        self.run_blocking(move |connection| {
            let inserted: Vec<TaskRow> = connection
                .transaction(|txn| {
                    rows.iter()
                        .map(|row| {
                            diesel::insert_into(tasks::table)
                                .values(row)
                                .returning(TaskRow::as_returning())
                                .get_result(txn)
                        })
                        .collect()
                })
                .map_err(TaskStoreError::persistence)?;
            inserted.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> TaskStoreResult<()> {
        let task_id = task.id();
        let changes = (
            tasks::is_urgent.eq(task.is_urgent()),
            tasks::status.eq(task.status().as_str().to_owned()),
            tasks::done_definition.eq(task
                .done_definition()
                .map(|definition| definition.as_str().to_owned())),
        );
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.value())))
                .set(changes)
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            if updated == 0 {
                return Err(TaskStoreError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(tasks::table.filter(tasks::id.eq(id.value())))
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn pending_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::status.eq(TaskStatus::Pending.as_str()))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn pending_count(&self) -> TaskStoreResult<u64> {
        self.run_blocking(move |connection| {
            let count: i64 = tasks::table
                .filter(tasks::status.eq(TaskStatus::Pending.as_str()))
                .count()
                .get_result(connection)
                .map_err(TaskStoreError::persistence)?;
            u64::try_from(count).map_err(TaskStoreError::persistence)
        })
        .await
    }

    async fn apply_urgency(
        &self,
        urgent: &[TaskId],
        non_urgent: &[TaskId],
    ) -> TaskStoreResult<()> {
        let urgent_ids: Vec<i64> = urgent.iter().map(|id| id.value()).collect();
        let non_urgent_ids: Vec<i64> = non_urgent.iter().map(|id| id.value()).collect();
        self.run_blocking(move |connection| {
            connection
                .transaction(|txn| {
                    diesel::update(tasks::table.filter(tasks::id.eq_any(&urgent_ids)))
                        .set(tasks::is_urgent.eq(true))
                        .execute(txn)?;
                    diesel::update(tasks::table.filter(tasks::id.eq_any(&non_urgent_ids)))
                        .set(tasks::is_urgent.eq(false))
                        .execute(txn)?;
                    Ok::<(), diesel::result::Error>(())
                })
                .map_err(TaskStoreError::persistence)
        })
        .await
    }

    async fn append_log(&self, draft: &NewDecisionLog) -> TaskStoreResult<DecisionLog> {
        let row = to_new_log_row(draft);
        self.run_blocking(move |connection| {
            let inserted: LogRow = diesel::insert_into(logs::table)
                .values(&row)
                .returning(LogRow::as_returning())
                .get_result(connection)
                .map_err(TaskStoreError::persistence)?;
            row_to_log(inserted)
        })
        .await
    }

    async fn logs_for_task(&self, task_id: TaskId) -> TaskStoreResult<Vec<DecisionLog>> {
        self.run_blocking(move |connection| {
            let rows = logs::table
                .filter(logs::task_id.eq(task_id.value()))
                .order(logs::chosen_at.asc())
                .select(LogRow::as_select())
                .load::<LogRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_log).collect()
        })
        .await
    }

    async fn recent_logs(&self, limit: u32) -> TaskStoreResult<Vec<DecisionLog>> {
        self.run_blocking(move |connection| {
            let rows = logs::table
                .order(logs::chosen_at.desc())
                .limit(i64::from(limit))
                .select(LogRow::as_select())
                .load::<LogRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_log).collect()
        })
        .await
    }
}

fn to_new_task_row(draft: &NewTask) -> NewTaskRow {
    NewTaskRow {
        text: draft.text().as_str().to_owned(),
        is_urgent: draft.is_urgent(),
        created_at: draft.created_at(),
        status: TaskStatus::Pending.as_str().to_owned(),
        done_definition: None,
    }
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let id = TaskId::new(row.id).map_err(TaskStoreError::persistence)?;
    let text = TaskText::new(row.text).map_err(TaskStoreError::persistence)?;
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskStoreError::persistence)?;
    let done_definition = row
        .done_definition
        .map(DoneDefinition::new)
        .transpose()
        .map_err(TaskStoreError::persistence)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id,
        text,
        is_urgent: row.is_urgent,
        created_at: row.created_at,
        status,
        done_definition,
    }))
}

fn to_new_log_row(draft: &NewDecisionLog) -> NewLogRow {
    NewLogRow {
        task_id: draft.task_id().value(),
        chosen_at: draft.chosen_at(),
        method: draft.method().as_str().to_owned(),
        completed_at: draft.completed_at(),
    }
}

fn row_to_log(row: LogRow) -> TaskStoreResult<DecisionLog> {
    let id = LogId::new(row.id).map_err(TaskStoreError::persistence)?;
    let task_id = TaskId::new(row.task_id).map_err(TaskStoreError::persistence)?;
    let method =
        SelectionMethod::try_from(row.method.as_str()).map_err(TaskStoreError::persistence)?;
    let mut draft = NewDecisionLog::new(task_id, method, row.chosen_at);
    if let Some(completed_at) = row.completed_at {
        draft = draft.with_completed_at(completed_at);
    }
    Ok(DecisionLog::from_draft(id, draft))
}
