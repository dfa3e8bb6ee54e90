//! Shared test helpers for in-memory store integration tests.

use mockable::DefaultClock;
use priority_engine::task::{
    adapters::memory::InMemoryTaskStore,
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

/// Provides a fresh in-memory store for each test.
#[fixture]
pub fn store() -> InMemoryTaskStore {
    InMemoryTaskStore::new()
}

/// Provides a clock for draft creation.
#[fixture]
pub fn clock() -> DefaultClock {
    DefaultClock
}

/// Inserts one pending task per text and returns the persisted records.
///
/// # Errors
///
/// Returns an error if draft validation or the batch insert fails.
pub fn seed_pending(
    rt: &Runtime,
    store: &InMemoryTaskStore,
    texts: &[&str],
) -> Result<Vec<Task>, Box<dyn std::error::Error + Send + Sync>> {
    let mut drafts = Vec::with_capacity(texts.len());
    for text in texts {
        drafts.push(NewTask::new(*text, &DefaultClock)?);
    }
    Ok(rt.block_on(store.add_tasks(&drafts))?)
}
