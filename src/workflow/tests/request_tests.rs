//! State machine tests for the task request aggregate.

use crate::project::domain::{CreatedTask, ProjectId, ProjectSummary};
use crate::workflow::domain::{
    Actor, ActorId, RequestState, TaskDetails, TaskDraftForm, TaskRequest, WorkflowDomainError,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn draft(clock: &DefaultClock) -> TaskRequest {
    TaskRequest::new(
        Actor::human(ActorId::new(1), "Alice"),
        Actor::human(ActorId::new(2), "Bob"),
        clock,
    )
}

fn details() -> TaskDetails {
    let form = TaskDraftForm {
        title: "Fix the build".to_owned(),
        ..TaskDraftForm::default()
    };
    TaskDetails::from_form(&form).expect("valid form")
}

fn pending(clock: &DefaultClock) -> TaskRequest {
    let mut request = draft(clock);
    request
        .attach_project(
            ProjectSummary::new(ProjectId::new(1), "Infrastructure"),
            clock,
        )
        .expect("draft accepts a project");
    request.submit(details(), clock).expect("draft submits");
    request
}

#[rstest]
fn a_new_request_starts_as_a_draft(clock: DefaultClock) {
    let request = draft(&clock);

    assert_eq!(request.state(), RequestState::Draft);
    assert!(request.project().is_none());
    assert!(request.details().is_none());
    assert_eq!(request.created_at(), request.updated_at());
}

#[rstest]
fn submitting_without_a_project_is_refused(clock: DefaultClock) {
    let mut request = draft(&clock);

    let result = request.submit(details(), &clock);

    assert_eq!(result, Err(WorkflowDomainError::MissingProject));
    assert_eq!(request.state(), RequestState::Draft);
}

#[rstest]
fn a_draft_with_a_project_submits_to_pending_approval(clock: DefaultClock) {
    let request = pending(&clock);

    assert_eq!(request.state(), RequestState::PendingApproval);
    assert!(request.details().is_some());
}

#[rstest]
fn reselecting_a_project_replaces_the_previous_choice(clock: DefaultClock) {
    let mut request = draft(&clock);

    request
        .attach_project(ProjectSummary::new(ProjectId::new(1), "First"), &clock)
        .expect("draft accepts a project");
    request
        .attach_project(ProjectSummary::new(ProjectId::new(2), "Second"), &clock)
        .expect("draft accepts a replacement");

    assert_eq!(request.project().map(ProjectSummary::name), Some("Second"));
}

#[rstest]
fn approval_records_the_created_task(clock: DefaultClock) {
    let mut request = pending(&clock);
    let created = CreatedTask::new(42, None);

    request
        .mark_approved(created.clone(), &clock)
        .expect("pending requests approve");

    assert_eq!(request.state(), RequestState::Approved);
    assert_eq!(request.created_task(), Some(&created));
    assert!(request.state().is_terminal());
}

#[rstest]
fn rejection_records_the_reason(clock: DefaultClock) {
    let mut request = pending(&clock);

    request
        .mark_rejected("out of scope".to_owned(), &clock)
        .expect("pending requests reject");

    assert_eq!(request.state(), RequestState::Rejected);
    assert_eq!(request.rejection_reason(), Some("out of scope"));
}

#[rstest]
fn failure_records_the_reason(clock: DefaultClock) {
    let mut request = pending(&clock);

    request
        .mark_failed("backend unavailable".to_owned(), &clock)
        .expect("pending requests fail");

    assert_eq!(request.state(), RequestState::Failed);
    assert_eq!(request.failure_reason(), Some("backend unavailable"));
}

#[rstest]
fn terminal_states_refuse_further_transitions(clock: DefaultClock) {
    let mut request = pending(&clock);
    request
        .mark_rejected("out of scope".to_owned(), &clock)
        .expect("pending requests reject");

    let result = request.mark_approved(CreatedTask::new(1, None), &clock);

    assert_eq!(
        result,
        Err(WorkflowDomainError::InvalidTransition {
            state: RequestState::Rejected,
            action: "approve",
        })
    );
    assert_eq!(request.state(), RequestState::Rejected);
}

#[rstest]
fn drafts_cannot_be_resolved(clock: DefaultClock) {
    let request = draft(&clock);

    let result = request.ensure_pending("resolve");

    assert_eq!(
        result,
        Err(WorkflowDomainError::InvalidTransition {
            state: RequestState::Draft,
            action: "resolve",
        })
    );
}

#[rstest]
fn only_the_designated_approver_may_act(clock: DefaultClock) {
    let request = pending(&clock);
    let bystander = Actor::human(ActorId::new(99), "Mallory");

    let result = request.ensure_designated_approver(&bystander);

    assert_eq!(
        result,
        Err(WorkflowDomainError::UnauthorizedActor {
            actor: "Mallory".to_owned(),
        })
    );
    assert!(request.ensure_designated_approver(request.approver()).is_ok());
}

#[rstest]
fn summaries_require_a_complete_request(clock: DefaultClock) {
    let incomplete = draft(&clock);
    assert_eq!(
        incomplete.summary(),
        Err(WorkflowDomainError::MissingProject)
    );

    let complete = pending(&clock);
    let summary = complete.summary().expect("complete requests summarise");

    assert_eq!(summary.project_name, "Infrastructure");
    assert_eq!(summary.requester_name, "Alice");
    assert_eq!(summary.approver_name, "Bob");
    assert_eq!(summary.details.title(), "Fix the build");
}
