//! Priority engine: a guided single-tasking session over a local task store.
//!
//! The crate drives one user through a fixed sequence of screens: dump
//! everything on your mind, triage each item by urgency, commit to a single
//! task, define what done looks like, execute, complete — persisting tasks
//! and decision history to a local database along the way.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure task and decision-log types with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete store implementations (in-memory, `SQLite`)
//!
//! # Modules
//!
//! - [`task`]: Task records, decision logs, and their stores
//! - [`session`]: The phase state machine a view layer drives

pub mod session;
pub mod task;
