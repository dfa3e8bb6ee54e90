//! Session state machine for the guided single-tasking flow.
//!
//! The machine sequences a fixed wizard: brain dump, urgency triage,
//! decision, execution gate, focus, and an all-done screen when triage
//! leaves nothing to decide on. Phase views are external collaborators:
//! they render the current [`Phase`] and emit [`SessionEvent`]s back; all
//! store writes happen here, at the transitions.

mod decision;
mod error;
mod event;
mod machine;
mod phase;
mod triage;

pub use decision::{DECISION_WINDOW_SECS, DecisionRound, MAX_SHOWN};
pub use error::SessionError;
pub use event::SessionEvent;
pub use machine::Session;
pub use phase::{Phase, Selection, SessionMode};
pub use triage::UrgencyTriage;
