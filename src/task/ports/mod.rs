//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces the session state machine
//! depends on; adapters supply the concrete stores.

pub mod store;

pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
