//! Approval workflow engine.
//!
//! Orchestrates one task request's lifecycle from initiation to terminal
//! outcome: project selection against the cache snapshot, field validation,
//! delivery to the approver, and resolution. On approval the task is created
//! in the backend; a backend failure moves the request to `Failed` and
//! notifies both parties instead of retrying.

use crate::project::{
    domain::{CreatedTask, NewTask, ProjectId, TaskStatus},
    ports::{BackendError, ProjectBackend},
    services::ProjectCache,
};
use crate::workflow::{
    domain::{
        Actor, EstimateHours, RequestSummary, TaskDetails, TaskDraftForm, TaskRequest,
        ValidationError, WorkflowDomainError,
        schedule::{format_backend_date, format_user_date},
        validation,
    },
    ports::{
        ApprovalAction, Decision, Notification, Presentation, PresentationError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Page size for project selection, dictated by the presentation
/// collaborator's selection-list limit.
pub const SELECTION_PAGE_SIZE: usize = 25;

/// Service-level errors for workflow operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// A field or identity failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The state machine refused the event.
    #[error(transparent)]
    Domain(#[from] WorkflowDomainError),
    /// The backend facade failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// The presentation collaborator failed.
    #[error(transparent)]
    Presentation(#[from] PresentationError),
    /// The chosen project is no longer in the cache snapshot.
    #[error("project {0} is no longer available")]
    StaleSelection(ProjectId),
    /// The backend lists no projects to create tasks in.
    #[error("no projects are available in the project-management backend")]
    NoProjectsAvailable,
}

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Terminal outcome of a resolved request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The approver accepted and the backend confirmed creation.
    Approved(CreatedTask),
    /// The approver rejected the request.
    Rejected {
        /// Justification forwarded to the requester.
        reason: String,
    },
    /// The approver accepted but backend creation failed.
    Failed {
        /// Plain-language failure description.
        reason: String,
    },
}

/// Approval workflow orchestration service.
///
/// One instance serves the whole process; each request runs as its own event
/// sequence, sharing only the project cache.
pub struct ApprovalWorkflowService<B, P, C>
where
    B: ProjectBackend,
    P: Presentation,
    C: Clock + Send + Sync,
{
    backend: Arc<B>,
    cache: Arc<ProjectCache<B, C>>,
    presenter: Arc<P>,
    clock: Arc<C>,
}

impl<B, P, C> ApprovalWorkflowService<B, P, C>
where
    B: ProjectBackend,
    P: Presentation,
    C: Clock + Send + Sync,
{
    /// Creates a workflow service.
    #[must_use]
    pub const fn new(
        backend: Arc<B>,
        cache: Arc<ProjectCache<B, C>>,
        presenter: Arc<P>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            backend,
            cache,
            presenter,
            clock,
        }
    }

    /// Validates the approver and allocates a draft request.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidApprover`] when the approver cannot
    /// approve requests.
    pub fn initiate(&self, requester: Actor, approver: Actor) -> WorkflowResult<TaskRequest> {
        validation::validate_approver(&approver, &requester)?;
        let request = TaskRequest::new(requester, approver, &*self.clock);
        info!(
            request_id = %request.id(),
            requester = request.requester().display_name(),
            approver = request.approver().display_name(),
            "task request initiated"
        );
        Ok(request)
    }

    /// Attaches the chosen project after checking it against the current
    /// cache snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::StaleSelection`] when the identifier is not
    /// in the snapshot, or a backend error when the snapshot cannot be
    /// refreshed at all.
    pub async fn select_project(
        &self,
        request: &mut TaskRequest,
        project_id: ProjectId,
    ) -> WorkflowResult<()> {
        let projects = self.cache.get_projects().await?;
        let project = projects
            .iter()
            .find(|candidate| candidate.id() == project_id)
            .cloned()
            .ok_or(WorkflowError::StaleSelection(project_id))?;
        request.attach_project(project, &*self.clock)?;
        Ok(())
    }

    /// Validates the submitted form and moves the request to
    /// `PendingApproval`.
    ///
    /// Validation failures leave the request in `Draft`; the requester may
    /// resubmit without limit.
    ///
    /// # Errors
    ///
    /// Returns the failing field's [`ValidationError`], or a domain error
    /// when the request is not a draft with a project attached.
    pub fn submit_details(
        &self,
        request: &mut TaskRequest,
        form: &TaskDraftForm,
    ) -> WorkflowResult<()> {
        let details = TaskDetails::from_form(form)?;
        request.submit(details, &*self.clock)?;
        info!(request_id = %request.id(), "task request submitted for approval");
        Ok(())
    }

    /// Applies an approver decision to a pending request.
    ///
    /// Actions from anyone but the designated approver, and rejections
    /// without a reason, are refused with the request state unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::UnauthorizedActor`],
    /// [`ValidationError::EmptyRejectionReason`], or an invalid-transition
    /// error for requests that are not pending. Backend failures do not
    /// surface here; they resolve the request as [`Resolution::Failed`].
    pub async fn resolve(
        &self,
        request: &mut TaskRequest,
        action: ApprovalAction,
    ) -> WorkflowResult<Resolution> {
        request.ensure_pending("resolve")?;
        request.ensure_designated_approver(&action.actor)?;
        match action.decision {
            Decision::Approve => self.approve(request).await,
            Decision::Reject { reason } => self.reject(request, reason).await,
        }
    }

    /// Runs one complete request conversation: the crate's single command
    /// surface.
    ///
    /// Initiates a request, loads and paginates projects (a listing failure
    /// or an empty list aborts while the request is still an undelivered
    /// draft), then drives the presentation round trips to a terminal
    /// resolution.
    ///
    /// # Errors
    ///
    /// Returns a [`WorkflowError`] when the flow cannot proceed: invalid
    /// approver, no projects, backend listing failure, stale selection, or a
    /// presentation channel failure.
    pub async fn run(&self, requester: Actor, approver: Actor) -> WorkflowResult<Resolution> {
        let mut request = self.initiate(requester, approver)?;
        let pages = self.cache.paginate(SELECTION_PAGE_SIZE).await?;
        if pages.is_empty() {
            warn!(request_id = %request.id(), "task request aborted: no projects available");
            return Err(WorkflowError::NoProjectsAvailable);
        }

        let chosen = self.presenter.present_choice(&pages).await?;
        self.select_project(&mut request, chosen).await?;
        self.collect_details(&mut request).await?;

        let summary = request.summary()?;
        self.presenter
            .send_direct_notification(request.requester(), &submission_confirmation(&summary))
            .await?;
        self.await_resolution(&mut request, &summary).await
    }

    /// Presents the task form until a submission passes validation.
    async fn collect_details(&self, request: &mut TaskRequest) -> WorkflowResult<()> {
        loop {
            let form = self.presenter.present_task_form().await?;
            match self.submit_details(request, &form) {
                Ok(()) => return Ok(()),
                Err(WorkflowError::Validation(validation_error)) => {
                    info!(
                        request_id = %request.id(),
                        error = %validation_error,
                        "form submission failed validation"
                    );
                    self.presenter
                        .send_direct_notification(
                            request.requester(),
                            &validation_notice(&validation_error),
                        )
                        .await?;
                }
                Err(other) => return Err(other),
            }
        }
    }

    /// Presents approval actions until the designated approver resolves the
    /// request. Actions from other identities and empty-reason rejections
    /// leave the request pending and are presented again.
    async fn await_resolution(
        &self,
        request: &mut TaskRequest,
        summary: &RequestSummary,
    ) -> WorkflowResult<Resolution> {
        loop {
            let action = self
                .presenter
                .present_approval_actions(request.approver(), summary)
                .await?;
            match self.resolve(request, action).await {
                Ok(resolution) => return Ok(resolution),
                Err(WorkflowError::Domain(WorkflowDomainError::UnauthorizedActor { actor })) => {
                    warn!(
                        request_id = %request.id(),
                        actor,
                        "ignored approval action from a non-approver"
                    );
                }
                Err(WorkflowError::Validation(ValidationError::EmptyRejectionReason)) => {
                    info!(
                        request_id = %request.id(),
                        "ignored rejection without a reason"
                    );
                }
                Err(other) => return Err(other),
            }
        }
    }

    /// Creates the task in the backend and finalizes the request.
    async fn approve(&self, request: &mut TaskRequest) -> WorkflowResult<Resolution> {
        let payload = build_new_task(request)?;
        match self.backend.create_task(payload).await {
            Ok(created) => {
                request.mark_approved(created.clone(), &*self.clock)?;
                info!(
                    request_id = %request.id(),
                    task_id = created.id(),
                    "task request approved and created"
                );
                self.presenter
                    .send_direct_notification(
                        request.requester(),
                        &approval_notice(request, &created),
                    )
                    .await?;
                self.presenter
                    .send_direct_notification(
                        request.approver(),
                        &approval_confirmation(request, &created),
                    )
                    .await?;
                Ok(Resolution::Approved(created))
            }
            Err(backend_error) => {
                warn!(
                    request_id = %request.id(),
                    error = %backend_error,
                    "backend task creation failed"
                );
                request.mark_failed(backend_error.to_string(), &*self.clock)?;
                let notice = failure_notice(request);
                self.presenter
                    .send_direct_notification(request.requester(), &notice)
                    .await?;
                self.presenter
                    .send_direct_notification(request.approver(), &notice)
                    .await?;
                Ok(Resolution::Failed {
                    reason: backend_error.to_string(),
                })
            }
        }
    }

    /// Records a rejection and notifies the requester with the reason.
    async fn reject(
        &self,
        request: &mut TaskRequest,
        reason: String,
    ) -> WorkflowResult<Resolution> {
        validation::validate_rejection_reason(&reason)?;
        request.mark_rejected(reason.clone(), &*self.clock)?;
        info!(request_id = %request.id(), "task request rejected");
        self.presenter
            .send_direct_notification(request.requester(), &rejection_notice(request, &reason))
            .await?;
        self.presenter
            .send_direct_notification(
                request.approver(),
                &rejection_confirmation(request, &reason),
            )
            .await?;
        Ok(Resolution::Rejected { reason })
    }
}

/// Builds the backend payload for an approved request.
///
/// The status is pinned to "in progress" regardless of user input, and the
/// description embeds the request context for traceability in the backend.
fn build_new_task(request: &TaskRequest) -> Result<NewTask, WorkflowDomainError> {
    let project = request.project().ok_or(WorkflowDomainError::MissingProject)?;
    let details = request.details().ok_or(WorkflowDomainError::MissingDetails)?;
    Ok(NewTask {
        project_id: project.id(),
        subject: details.title().to_owned(),
        description: compose_description(request, details),
        estimated_time: details.estimate().map(EstimateHours::to_iso8601),
        start_date: details.start_date().map(format_backend_date),
        due_date: details.end_date().map(format_backend_date),
        status: TaskStatus::InProgress,
    })
}

/// Composes the backend task description: the user's text, the dates in the
/// form the requester typed them, and both parties' display names.
fn compose_description(request: &TaskRequest, details: &TaskDetails) -> String {
    let mut description = String::new();
    if !details.description().is_empty() {
        description.push_str(details.description());
        description.push_str("\n\n");
    }
    if let Some(start) = details.start_date() {
        description.push_str(&format!("Start date: {}\n", format_user_date(start)));
    }
    if let Some(end) = details.end_date() {
        description.push_str(&format!("Due date: {}\n", format_user_date(end)));
    }
    description.push_str(&format!(
        "Requested by: {}\n",
        request.requester().display_name()
    ));
    description.push_str(&format!(
        "Approved by: {}",
        request.approver().display_name()
    ));
    description
}

fn submission_confirmation(summary: &RequestSummary) -> Notification {
    Notification::new(
        "Request sent for approval",
        format!(
            "Your request for task '{}' in project '{}' was sent to {} for approval. \
             You will be notified once it is processed.",
            summary.details.title(),
            summary.project_name,
            summary.approver_name
        ),
    )
}

fn validation_notice(error: &ValidationError) -> Notification {
    Notification::new(
        "Please correct the form",
        format!("{error}. Please adjust the field and submit again."),
    )
}

fn approval_notice(request: &TaskRequest, created: &CreatedTask) -> Notification {
    let link = created
        .link()
        .map(|url| format!(" You can open it at {url}."))
        .unwrap_or_default();
    Notification::new(
        "Task approved and created",
        format!(
            "Your task request was approved by {} and created as task {}.{}",
            request.approver().display_name(),
            created.id(),
            link
        ),
    )
}

fn approval_confirmation(request: &TaskRequest, created: &CreatedTask) -> Notification {
    Notification::new(
        "Task created",
        format!(
            "The task requested by {} was created as task {}.",
            request.requester().display_name(),
            created.id()
        ),
    )
}

fn rejection_notice(request: &TaskRequest, reason: &str) -> Notification {
    Notification::new(
        "Task request rejected",
        format!(
            "Your task request was rejected by {}. Reason: {reason}",
            request.approver().display_name()
        ),
    )
}

fn rejection_confirmation(request: &TaskRequest, reason: &str) -> Notification {
    Notification::new(
        "Rejection recorded",
        format!(
            "The request from {} was rejected. Reason: {reason}",
            request.requester().display_name()
        ),
    )
}

fn failure_notice(request: &TaskRequest) -> Notification {
    let title = request
        .details()
        .map_or("(unknown)", TaskDetails::title);
    let reason = request.failure_reason().unwrap_or("unknown error");
    Notification::new(
        "Task creation failed",
        format!(
            "The request for task '{title}' was approved, but the task could not be \
             created: {reason}. It was not retried; please contact an administrator."
        ),
    )
}
