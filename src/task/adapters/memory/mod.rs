//! In-memory adapter for the task store port.

mod store;

pub use store::InMemoryTaskStore;
