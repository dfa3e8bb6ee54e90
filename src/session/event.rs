//! Events a view layer emits to drive the session state machine.

use crate::task::domain::{SelectionMethod, TaskId};

/// Phase-completion events, one per transition of the wizard.
///
/// Views validate their input before emitting (non-empty texts, minimum
/// done-definition length); the state machine re-checks through the domain
/// types so an unvalidated payload can never corrupt the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Brain dump finished; carries the texts that survived mid-dump edits.
    DumpComplete {
        /// New task texts, expected non-empty; empty entries are dropped.
        items: Vec<String>,
    },
    /// Urgency triage finished; carries the subset classified urgent.
    UrgencyComplete {
        /// Handles of the candidates classified urgent.
        urgent: Vec<TaskId>,
    },
    /// Deletes a task outright; fires any time during urgency triage.
    Dismiss {
        /// Handle of the task to remove from the store.
        task: TaskId,
    },
    /// One candidate was chosen at the decision step.
    Select {
        /// Handle of the chosen candidate.
        task: TaskId,
        /// Whether the user clicked or the countdown expired.
        method: SelectionMethod,
    },
    /// The execution gate was confirmed with a definition of done.
    GateConfirm {
        /// Done-definition text, re-validated by the domain.
        definition: String,
    },
    /// The execution gate was abandoned; returns to the decision round.
    GateCancel,
    /// Execution of the selected task finished.
    FocusComplete,
    /// Manual restart from the all-done screen.
    Restart,
}

impl SessionEvent {
    /// Returns a short name for diagnostics and error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DumpComplete { .. } => "dump_complete",
            Self::UrgencyComplete { .. } => "urgency_complete",
            Self::Dismiss { .. } => "dismiss",
            Self::Select { .. } => "select",
            Self::GateConfirm { .. } => "gate_confirm",
            Self::GateCancel => "gate_cancel",
            Self::FocusComplete => "focus_complete",
            Self::Restart => "restart",
        }
    }
}
