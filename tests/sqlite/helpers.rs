//! Shared test helpers for `SQLite` store integration tests.

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use mockable::DefaultClock;
use priority_engine::task::{
    adapters::sqlite::SqliteTaskStore,
    domain::{NewTask, Task},
    ports::TaskStore,
};
use rstest::fixture;
use std::io;
use tokio::runtime::Runtime;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a clock for draft creation.
#[fixture]
pub fn clock() -> DefaultClock {
    DefaultClock
}

/// Builds a store over a fresh in-memory database with its schema applied.
///
/// The pool is capped at one connection: each `:memory:` connection is its
/// own database, so every operation must share the single handle.
///
/// # Errors
///
/// Returns an error if the pool cannot be built or the DDL fails.
pub fn memory_store(
    rt: &Runtime,
) -> Result<SqliteTaskStore, Box<dyn std::error::Error + Send + Sync>> {
    let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
    let pool = Pool::builder().max_size(1).build(manager)?;
    let store = SqliteTaskStore::new(pool);
    rt.block_on(store.initialize())?;
    Ok(store)
}

/// Inserts one pending task per text and returns the persisted records.
///
/// # Errors
///
/// Returns an error if draft validation or the batch insert fails.
pub fn seed_pending(
    rt: &Runtime,
    store: &SqliteTaskStore,
    texts: &[&str],
) -> Result<Vec<Task>, Box<dyn std::error::Error + Send + Sync>> {
    let mut drafts = Vec::with_capacity(texts.len());
    for text in texts {
        drafts.push(NewTask::new(*text, &DefaultClock)?);
    }
    Ok(rt.block_on(store.add_tasks(&drafts))?)
}
