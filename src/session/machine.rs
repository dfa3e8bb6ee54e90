//! Session state machine sequencing the wizard phases over the store.

use super::decision::DecisionRound;
use super::error::SessionError;
use super::event::SessionEvent;
use super::phase::{Phase, Selection, SessionMode};
use super::triage::UrgencyTriage;
use crate::task::domain::{
    DoneDefinition, NewDecisionLog, NewTask, SelectionMethod, Task, TaskDomainError, TaskId,
};
use crate::task::ports::TaskStore;
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, warn};

/// In-memory controller for one user's session.
///
/// The store is constructed by the caller and injected, never reached
/// through ambient global state; tests substitute the in-memory adapter.
/// Every event is processed to completion, store writes included, before
/// the phase advances, so a view never renders ahead of durable state.
#[derive(Clone)]
pub struct Session<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    phase: Phase,
}

impl<S, C> Session<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Starts a session at the brain-dump phase.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when the pending count cannot be
    /// read.
    pub async fn start(store: Arc<S>, clock: Arc<C>) -> Result<Self, SessionError> {
        let pending_count = store.pending_count().await?;
        Ok(Self {
            store,
            clock,
            phase: Phase::BrainDump { pending_count },
        })
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Applies a view-emitted event to the machine.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EventNotAllowed`] when the current phase
    /// does not accept the event, [`SessionError::Domain`] when the payload
    /// fails validation, or [`SessionError::Store`] when persistence fails.
    /// The phase is unchanged on any error.
    pub async fn handle(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        match event {
            SessionEvent::DumpComplete { items } => self.complete_dump(items).await,
            SessionEvent::UrgencyComplete { urgent } => self.complete_urgency(&urgent).await,
            SessionEvent::Dismiss { task } => self.dismiss(task).await,
            SessionEvent::Select { task, method } => self.select(task, method),
            SessionEvent::GateConfirm { definition } => self.confirm_gate(definition).await,
            SessionEvent::GateCancel => self.cancel_gate(),
            SessionEvent::FocusComplete => self.complete_focus().await,
            SessionEvent::Restart => self.restart().await,
        }
    }

    /// Classifies the triage candidate currently offered and advances the
    /// pass; classifying the last candidate completes triage with the
    /// accumulated urgent set.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EventNotAllowed`] outside the urgency phase
    /// or [`SessionError::Store`] when the completing write fails.
    pub async fn classify_current(&mut self, is_urgent: bool) -> Result<(), SessionError> {
        let Phase::Urgency { triage } = &mut self.phase else {
            return Err(self.not_allowed("classify"));
        };
        if let Some(urgent_set) = triage.classify(is_urgent) {
            return self.complete_urgency(&urgent_set).await;
        }
        Ok(())
    }

    /// Advances the decision countdown by one second.
    ///
    /// On expiry the first shown candidate is auto-selected. Ticks arriving
    /// outside the decision phase are stale timer events and are ignored.
    ///
    /// # Errors
    ///
    /// Never fails outside the auto-selection path; auto-selection itself
    /// performs no store write.
    pub fn tick(&mut self) -> Result<(), SessionError> {
        let Phase::Decision { round } = &mut self.phase else {
            return Ok(());
        };
        if !round.tick() {
            return Ok(());
        }
        let Some(first) = round.first_shown() else {
            return Ok(());
        };
        let id = first.id();
        debug!(task = %id, "countdown expired, auto-selecting first candidate");
        self.select(id, SelectionMethod::Auto)
    }

    /// Captures an urgent task immediately, from any phase.
    ///
    /// The captured task does not join the current candidate set; it
    /// surfaces at the next brain dump. A store failure is caught and
    /// logged rather than propagated, so the capture affordance stays open
    /// for a retry; `None` signals that nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskText`] when the text is empty
    /// after trimming.
    pub async fn quick_capture(
        &self,
        text: impl Into<String> + Send,
    ) -> Result<Option<Task>, TaskDomainError> {
        let draft = NewTask::urgent(text, &*self.clock)?;
        match self.store.add_task(&draft).await {
            Ok(task) => {
                debug!(task = %task.id(), "quick-captured urgent task");
                Ok(Some(task))
            }
            Err(err) => {
                warn!(error = %err, "quick capture failed");
                Ok(None)
            }
        }
    }

    const fn not_allowed(&self, event: &'static str) -> SessionError {
        SessionError::EventNotAllowed {
            phase: self.phase.name(),
            event,
        }
    }

    async fn complete_dump(&mut self, items: Vec<String>) -> Result<(), SessionError> {
        if !matches!(self.phase, Phase::BrainDump { .. }) {
            return Err(self.not_allowed("dump_complete"));
        }
        let mut drafts = Vec::with_capacity(items.len());
        for text in items {
            if text.trim().is_empty() {
                continue;
            }
            drafts.push(NewTask::new(text, &*self.clock)?);
        }
        if !drafts.is_empty() {
            self.store.add_tasks(&drafts).await?;
        }
        let candidates = self.store.pending_tasks().await?;
        if candidates.is_empty() {
            // Nothing new and nothing waiting: the dump view stays up.
            self.phase = Phase::BrainDump { pending_count: 0 };
            return Ok(());
        }
        debug!(candidates = candidates.len(), "entering urgency triage");
        self.phase = Phase::Urgency {
            triage: UrgencyTriage::new(candidates),
        };
        Ok(())
    }

    async fn complete_urgency(&mut self, urgent: &[TaskId]) -> Result<(), SessionError> {
        let Phase::Urgency { triage } = &self.phase else {
            return Err(self.not_allowed("urgency_complete"));
        };
        let candidate_ids = triage.candidate_ids();
        let urgent_ids: Vec<TaskId> = candidate_ids
            .iter()
            .copied()
            .filter(|id| urgent.contains(id))
            .collect();
        let non_urgent_ids: Vec<TaskId> = candidate_ids
            .iter()
            .copied()
            .filter(|id| !urgent.contains(id))
            .collect();
        self.store.apply_urgency(&urgent_ids, &non_urgent_ids).await?;

        // Reconcile against the store: candidates dismissed mid-triage no
        // longer exist and must not be resurrected as backlog.
        let pending = self.store.pending_tasks().await?;
        let urgent_tasks: Vec<Task> = pending
            .iter()
            .filter(|task| urgent_ids.contains(&task.id()))
            .cloned()
            .collect();
        let backlog: Vec<Task> = pending
            .iter()
            .filter(|task| non_urgent_ids.contains(&task.id()))
            .cloned()
            .collect();

        if urgent_tasks.is_empty() && backlog.is_empty() {
            debug!("no candidates survived triage");
            self.phase = Phase::AllDone;
        } else if urgent_tasks.is_empty() {
            debug!(candidates = backlog.len(), "entering decision in backlog mode");
            self.phase = Phase::Decision {
                round: DecisionRound::new(backlog, SessionMode::Backlog),
            };
        } else {
            debug!(candidates = urgent_tasks.len(), "entering decision in urgent mode");
            self.phase = Phase::Decision {
                round: DecisionRound::new(urgent_tasks, SessionMode::Urgent),
            };
        }
        Ok(())
    }

    async fn dismiss(&mut self, task: TaskId) -> Result<(), SessionError> {
        if !matches!(self.phase, Phase::Urgency { .. }) {
            return Err(self.not_allowed("dismiss"));
        }
        self.store.delete_task(task).await?;
        debug!(%task, "task dismissed during triage");
        Ok(())
    }

    fn select(&mut self, task: TaskId, method: SelectionMethod) -> Result<(), SessionError> {
        let Phase::Decision { round } = &self.phase else {
            return Err(self.not_allowed("select"));
        };
        let chosen = round
            .shown()
            .iter()
            .find(|candidate| candidate.id() == task)
            .cloned()
            .ok_or(SessionError::NotSelectable(task))?;
        let selection = Selection::new(chosen, method, self.clock.utc());
        let retained = round.clone();
        self.phase = Phase::Gate {
            round: retained,
            selection,
        };
        Ok(())
    }

    async fn confirm_gate(&mut self, definition: String) -> Result<(), SessionError> {
        let Phase::Gate { selection, .. } = &self.phase else {
            return Err(self.not_allowed("gate_confirm"));
        };
        let validated = DoneDefinition::new(definition)?;
        let mut task = selection.task().clone();
        task.attach_done_definition(validated)?;
        self.store.update_task(&task).await?;
        debug!(task = %task.id(), "task activated, entering focus");
        let updated = selection.clone().with_task(task);
        self.phase = Phase::Focus { selection: updated };
        Ok(())
    }

    fn cancel_gate(&mut self) -> Result<(), SessionError> {
        let Phase::Gate { round, .. } = &self.phase else {
            return Err(self.not_allowed("gate_cancel"));
        };
        // The draft selection is discarded; the countdown restarts with the
        // prior candidate set.
        let resumed = round.clone().restarted();
        self.phase = Phase::Decision { round: resumed };
        Ok(())
    }

    async fn complete_focus(&mut self) -> Result<(), SessionError> {
        let Phase::Focus { selection } = &self.phase else {
            return Err(self.not_allowed("focus_complete"));
        };
        let mut task = selection.task().clone();
        task.complete()?;
        let draft = NewDecisionLog::new(task.id(), selection.method(), selection.chosen_at())
            .with_completed_at(self.clock.utc());
        self.store.update_task(&task).await?;
        self.store.append_log(&draft).await?;
        debug!(task = %task.id(), "task completed, session loops back");
        let pending_count = self.store.pending_count().await?;
        self.phase = Phase::BrainDump { pending_count };
        Ok(())
    }

    async fn restart(&mut self) -> Result<(), SessionError> {
        if !matches!(self.phase, Phase::AllDone) {
            return Err(self.not_allowed("restart"));
        }
        let pending_count = self.store.pending_count().await?;
        self.phase = Phase::BrainDump { pending_count };
        Ok(())
    }
}
