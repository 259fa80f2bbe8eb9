//! Presentation port: the chat-side operations the workflow invokes.
//!
//! The workflow never renders UI; it asks the presentation collaborator to
//! present a choice, present a form, present accept/reject actions, or send
//! a direct notification, and suspends until the relevant actor responds.
//! Each operation is one blocking round trip.

use crate::project::domain::{ProjectId, ProjectPages};
use crate::workflow::domain::{Actor, RequestSummary, TaskDraftForm};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for presentation operations.
pub type PresentationResult<T> = Result<T, PresentationError>;

/// The approver's response to a pending request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Accept the request and create the task.
    Approve,
    /// Reject the request with a justification.
    Reject {
        /// Justification shown to the requester.
        reason: String,
    },
}

/// A decision together with the identity that made it.
///
/// The workflow verifies the identity itself; presentation adapters cannot
/// be trusted to filter out actions from bystanders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalAction {
    /// Identity that pressed accept or reject.
    pub actor: Actor,
    /// The decision taken.
    pub decision: Decision,
}

/// A plain-language direct message to one actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Short headline.
    pub subject: String,
    /// Message body.
    pub body: String,
}

impl Notification {
    /// Creates a notification.
    #[must_use]
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Chat-side operations consumed by the workflow engine.
#[async_trait]
pub trait Presentation: Send + Sync {
    /// Presents a paginated project choice to the requester and waits for a
    /// selection.
    ///
    /// # Errors
    ///
    /// Returns [`PresentationError`] when the interaction times out or the
    /// channel is gone.
    async fn present_choice(&self, pages: &ProjectPages) -> PresentationResult<ProjectId>;

    /// Presents the task details form and waits for one submission.
    ///
    /// # Errors
    ///
    /// Returns [`PresentationError`] when the interaction times out or the
    /// channel is gone.
    async fn present_task_form(&self) -> PresentationResult<TaskDraftForm>;

    /// Delivers the request summary with accept/reject actions to the
    /// approver and waits for the next action taken on it.
    ///
    /// The action may come from any identity; the workflow performs the
    /// approver check.
    ///
    /// # Errors
    ///
    /// Returns [`PresentationError`] when the interaction times out or the
    /// channel is gone.
    async fn present_approval_actions(
        &self,
        approver: &Actor,
        summary: &RequestSummary,
    ) -> PresentationResult<ApprovalAction>;

    /// Sends a direct notification to one actor.
    ///
    /// # Errors
    ///
    /// Returns [`PresentationError`] when the recipient cannot be reached.
    async fn send_direct_notification(
        &self,
        recipient: &Actor,
        notification: &Notification,
    ) -> PresentationResult<()>;
}

/// Errors returned by presentation adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PresentationError {
    /// The chat channel or recipient is unreachable.
    #[error("presentation channel unavailable: {0}")]
    ChannelUnavailable(String),

    /// The actor did not respond within the interaction timeout.
    #[error("interaction timed out")]
    Timeout,
}
