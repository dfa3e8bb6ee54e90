//! Domain model for task capture and decision logging.
//!
//! The domain models validated task text and done-definitions, the forward
//! task status machine, and append-only decision log entries, keeping all
//! infrastructure concerns outside of the domain boundary. Record handles
//! are assigned by the store, so unpersisted values are expressed as
//! [`NewTask`] and [`NewDecisionLog`] drafts.

mod error;
mod ids;
mod log;
mod task;

pub use error::{ParseSelectionMethodError, ParseTaskStatusError, TaskDomainError};
pub use ids::{LogId, TaskId};
pub use log::{DecisionLog, NewDecisionLog, SelectionMethod};
pub use task::{DoneDefinition, NewTask, PersistedTaskData, Task, TaskStatus, TaskText};
