//! Scripted in-memory presentation adapter for tests.

use crate::project::domain::{ProjectId, ProjectPages};
use crate::workflow::{
    domain::{Actor, ActorId, RequestSummary, TaskDraftForm},
    ports::{
        ApprovalAction, Notification, Presentation, PresentationError, PresentationResult,
    },
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Thread-safe scripted implementation of [`Presentation`].
///
/// Responses are queued ahead of the run; an exhausted queue behaves like an
/// actor who never responded. Every notification is recorded per recipient.
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    state: Mutex<PresenterState>,
}

#[derive(Debug, Default)]
struct PresenterState {
    choices: VecDeque<ProjectId>,
    forms: VecDeque<TaskDraftForm>,
    actions: VecDeque<ApprovalAction>,
    notifications: Vec<(Actor, Notification)>,
    presented_summaries: Vec<RequestSummary>,
}

impl ScriptedPresenter {
    /// Creates a presenter with empty scripts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a project selection response.
    ///
    /// # Panics
    ///
    /// Panics when the internal lock is poisoned; test-double state is never
    /// shared across panicking threads in practice.
    pub fn queue_choice(&self, choice: ProjectId) {
        self.with_state(|state| state.choices.push_back(choice));
    }

    /// Queues a form submission response.
    ///
    /// # Panics
    ///
    /// Panics when the internal lock is poisoned.
    pub fn queue_form(&self, form: TaskDraftForm) {
        self.with_state(|state| state.forms.push_back(form));
    }

    /// Queues an approval action response.
    ///
    /// # Panics
    ///
    /// Panics when the internal lock is poisoned.
    pub fn queue_action(&self, action: ApprovalAction) {
        self.with_state(|state| state.actions.push_back(action));
    }

    /// Returns every notification sent so far, in order.
    ///
    /// # Panics
    ///
    /// Panics when the internal lock is poisoned.
    #[must_use]
    pub fn notifications(&self) -> Vec<(Actor, Notification)> {
        self.with_state(|state| state.notifications.clone())
    }

    /// Returns the notifications sent to one recipient, in order.
    ///
    /// # Panics
    ///
    /// Panics when the internal lock is poisoned.
    #[must_use]
    pub fn notifications_for(&self, recipient: ActorId) -> Vec<Notification> {
        self.with_state(|state| {
            state
                .notifications
                .iter()
                .filter(|(actor, _)| actor.id() == recipient)
                .map(|(_, notification)| notification.clone())
                .collect()
        })
    }

    /// Returns every request summary presented to an approver, in order.
    ///
    /// # Panics
    ///
    /// Panics when the internal lock is poisoned.
    #[must_use]
    pub fn presented_summaries(&self) -> Vec<RequestSummary> {
        self.with_state(|state| state.presented_summaries.clone())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut PresenterState) -> T) -> T {
        #[expect(clippy::unwrap_used, reason = "test double; poisoned lock is a test bug")]
        let mut guard = self.state.lock().unwrap();
        f(&mut guard)
    }
}

#[async_trait]
impl Presentation for ScriptedPresenter {
    async fn present_choice(&self, _pages: &ProjectPages) -> PresentationResult<ProjectId> {
        self.with_state(|state| state.choices.pop_front().ok_or(PresentationError::Timeout))
    }

    async fn present_task_form(&self) -> PresentationResult<TaskDraftForm> {
        self.with_state(|state| state.forms.pop_front().ok_or(PresentationError::Timeout))
    }

    async fn present_approval_actions(
        &self,
        _approver: &Actor,
        summary: &RequestSummary,
    ) -> PresentationResult<ApprovalAction> {
        self.with_state(|state| {
            state.presented_summaries.push(summary.clone());
            state.actions.pop_front().ok_or(PresentationError::Timeout)
        })
    }

    async fn send_direct_notification(
        &self,
        recipient: &Actor,
        notification: &Notification,
    ) -> PresentationResult<()> {
        self.with_state(|state| {
            state
                .notifications
                .push((recipient.clone(), notification.clone()));
            Ok(())
        })
    }
}
