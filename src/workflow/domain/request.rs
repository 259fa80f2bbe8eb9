//! Task request aggregate root and its lifecycle state machine.

use super::{Actor, RequestId, TaskDetails, WorkflowDomainError};
use crate::project::domain::{CreatedTask, ProjectSummary};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task request lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    /// The requester is still assembling the request.
    Draft,
    /// The request has been delivered to the approver.
    PendingApproval,
    /// The backend confirmed task creation.
    Approved,
    /// The approver rejected the request.
    Rejected,
    /// Backend task creation failed after approval.
    Failed,
}

impl RequestState {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        }
    }

    /// Returns `true` for states from which no further transition occurs.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Failed)
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One in-flight task creation request.
///
/// A request is exclusively owned by the workflow run that created it and
/// lives only in memory; in-flight requests are lost on process restart.
/// Terminal states are reached exactly once and permit no further mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    id: RequestId,
    requester: Actor,
    approver: Actor,
    project: Option<ProjectSummary>,
    details: Option<TaskDetails>,
    state: RequestState,
    rejection_reason: Option<String>,
    created_task: Option<CreatedTask>,
    failure_reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskRequest {
    /// Allocates a draft request for a validated requester/approver pair.
    #[must_use]
    pub fn new(requester: Actor, approver: Actor, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: RequestId::new(),
            requester,
            approver,
            project: None,
            details: None,
            state: RequestState::Draft,
            rejection_reason: None,
            created_task: None,
            failure_reason: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the request identifier.
    #[must_use]
    pub const fn id(&self) -> RequestId {
        self.id
    }

    /// Returns the requester identity.
    #[must_use]
    pub const fn requester(&self) -> &Actor {
        &self.requester
    }

    /// Returns the designated approver identity.
    #[must_use]
    pub const fn approver(&self) -> &Actor {
        &self.approver
    }

    /// Returns the selected project, once one has been attached.
    #[must_use]
    pub const fn project(&self) -> Option<&ProjectSummary> {
        self.project.as_ref()
    }

    /// Returns the submitted task details, once they exist.
    #[must_use]
    pub const fn details(&self) -> Option<&TaskDetails> {
        self.details.as_ref()
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> RequestState {
        self.state
    }

    /// Returns the rejection justification; present only when rejected.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    /// Returns the created backend task; present only when approved.
    #[must_use]
    pub const fn created_task(&self) -> Option<&CreatedTask> {
        self.created_task.as_ref()
    }

    /// Returns the failure description; present only when failed.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Attaches (or replaces) the selected project while drafting.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::InvalidTransition`] outside `Draft`.
    pub fn attach_project(
        &mut self,
        project: ProjectSummary,
        clock: &impl Clock,
    ) -> Result<(), WorkflowDomainError> {
        self.ensure_state(RequestState::Draft, "select a project for")?;
        self.project = Some(project);
        self.touch(clock);
        Ok(())
    }

    /// Submits validated details, moving the request to `PendingApproval`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::InvalidTransition`] outside `Draft` or
    /// [`WorkflowDomainError::MissingProject`] when no project is attached.
    pub fn submit(
        &mut self,
        details: TaskDetails,
        clock: &impl Clock,
    ) -> Result<(), WorkflowDomainError> {
        self.ensure_state(RequestState::Draft, "submit")?;
        if self.project.is_none() {
            return Err(WorkflowDomainError::MissingProject);
        }
        self.details = Some(details);
        self.state = RequestState::PendingApproval;
        self.touch(clock);
        Ok(())
    }

    /// Checks that the request is awaiting approval.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::InvalidTransition`] outside
    /// `PendingApproval`; the request is left untouched.
    pub fn ensure_pending(&self, action: &'static str) -> Result<(), WorkflowDomainError> {
        self.ensure_state(RequestState::PendingApproval, action)
    }

    /// Checks that the acting identity is the designated approver.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::UnauthorizedActor`] otherwise; the
    /// request is left untouched.
    pub fn ensure_designated_approver(&self, actor: &Actor) -> Result<(), WorkflowDomainError> {
        if actor.id() != self.approver.id() {
            return Err(WorkflowDomainError::UnauthorizedActor {
                actor: actor.display_name().to_owned(),
            });
        }
        Ok(())
    }

    /// Records backend confirmation, moving the request to `Approved`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::InvalidTransition`] outside
    /// `PendingApproval`.
    pub fn mark_approved(
        &mut self,
        created: CreatedTask,
        clock: &impl Clock,
    ) -> Result<(), WorkflowDomainError> {
        self.ensure_state(RequestState::PendingApproval, "approve")?;
        self.created_task = Some(created);
        self.state = RequestState::Approved;
        self.touch(clock);
        Ok(())
    }

    /// Records a rejection with its justification.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::InvalidTransition`] outside
    /// `PendingApproval`.
    pub fn mark_rejected(
        &mut self,
        reason: String,
        clock: &impl Clock,
    ) -> Result<(), WorkflowDomainError> {
        self.ensure_state(RequestState::PendingApproval, "reject")?;
        self.rejection_reason = Some(reason);
        self.state = RequestState::Rejected;
        self.touch(clock);
        Ok(())
    }

    /// Records a backend creation failure, moving the request to `Failed`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::InvalidTransition`] outside
    /// `PendingApproval`.
    pub fn mark_failed(
        &mut self,
        reason: String,
        clock: &impl Clock,
    ) -> Result<(), WorkflowDomainError> {
        self.ensure_state(RequestState::PendingApproval, "fail")?;
        self.failure_reason = Some(reason);
        self.state = RequestState::Failed;
        self.touch(clock);
        Ok(())
    }

    /// Projects the request into the summary shown to the approver.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::MissingProject`] or
    /// [`WorkflowDomainError::MissingDetails`] while the request is still
    /// incomplete.
    pub fn summary(&self) -> Result<RequestSummary, WorkflowDomainError> {
        let project = self
            .project
            .as_ref()
            .ok_or(WorkflowDomainError::MissingProject)?;
        let details = self
            .details
            .as_ref()
            .ok_or(WorkflowDomainError::MissingDetails)?;
        Ok(RequestSummary {
            request_id: self.id,
            project_name: project.name().to_owned(),
            details: details.clone(),
            requester_name: self.requester.display_name().to_owned(),
            approver_name: self.approver.display_name().to_owned(),
        })
    }

    fn ensure_state(
        &self,
        expected: RequestState,
        action: &'static str,
    ) -> Result<(), WorkflowDomainError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(WorkflowDomainError::InvalidTransition {
                state: self.state,
                action,
            })
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Snapshot of a pending request as presented to the approver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSummary {
    /// Identifier of the summarised request.
    pub request_id: RequestId,
    /// Display name of the selected project.
    pub project_name: String,
    /// Validated task details.
    pub details: TaskDetails,
    /// Requester display name.
    pub requester_name: String,
    /// Approver display name.
    pub approver_name: String,
}
