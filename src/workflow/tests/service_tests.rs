//! End-to-end engine tests over scripted presentation round trips.

use crate::project::{
    adapters::memory::InMemoryProjectBackend,
    domain::{ProjectId, ProjectSummary, TaskStatus},
    ports::BackendError,
    services::ProjectCache,
};
use crate::workflow::{
    adapters::memory::ScriptedPresenter,
    domain::{Actor, ActorId, RequestState, TaskDraftForm, ValidationError},
    ports::{ApprovalAction, Decision},
    services::{ApprovalWorkflowService, Resolution, WorkflowError},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestService =
    ApprovalWorkflowService<InMemoryProjectBackend, ScriptedPresenter, DefaultClock>;

struct Harness {
    backend: Arc<InMemoryProjectBackend>,
    presenter: Arc<ScriptedPresenter>,
    service: TestService,
}

fn requester() -> Actor {
    Actor::human(ActorId::new(10), "Alice")
}

fn approver() -> Actor {
    Actor::human(ActorId::new(20), "Bob")
}

fn valid_form() -> TaskDraftForm {
    TaskDraftForm {
        title: "Provision the staging cluster".to_owned(),
        description: "Three nodes, default sizing.".to_owned(),
        estimate: "2.5".to_owned(),
        start_date: "01/06/2025".to_owned(),
        end_date: "15/06/2025".to_owned(),
    }
}

fn approve_as(actor: Actor) -> ApprovalAction {
    ApprovalAction {
        actor,
        decision: Decision::Approve,
    }
}

fn reject_as(actor: Actor, reason: &str) -> ApprovalAction {
    ApprovalAction {
        actor,
        decision: Decision::Reject {
            reason: reason.to_owned(),
        },
    }
}

#[fixture]
fn harness() -> Harness {
    let backend = Arc::new(InMemoryProjectBackend::with_projects(vec![
        ProjectSummary::new(ProjectId::new(1), "Infrastructure"),
        ProjectSummary::new(ProjectId::new(2), "Platform"),
    ]));
    let clock = Arc::new(DefaultClock);
    let cache = Arc::new(ProjectCache::new(Arc::clone(&backend), Arc::clone(&clock)));
    let presenter = Arc::new(ScriptedPresenter::new());
    let service = ApprovalWorkflowService::new(
        Arc::clone(&backend),
        cache,
        Arc::clone(&presenter),
        clock,
    );
    Harness {
        backend,
        presenter,
        service,
    }
}

#[rstest]
fn initiate_allocates_a_draft_for_a_valid_pair(harness: Harness) {
    let request = harness
        .service
        .initiate(requester(), approver())
        .expect("a human approver is accepted");

    assert_eq!(request.state(), RequestState::Draft);
    assert_eq!(request.requester().id(), ActorId::new(10));
    assert_eq!(request.approver().id(), ActorId::new(20));
    assert!(request.project().is_none());
}

#[rstest]
fn initiate_refuses_a_bot_approver(harness: Harness) {
    let bot = Actor::bot(ActorId::new(3), "taskbot");

    let result = harness.service.initiate(requester(), bot);

    assert!(matches!(
        result,
        Err(WorkflowError::Validation(ValidationError::InvalidApprover(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn an_approved_request_creates_the_backend_task(harness: Harness) {
    harness.presenter.queue_choice(ProjectId::new(1));
    harness.presenter.queue_form(valid_form());
    harness.presenter.queue_action(approve_as(approver()));

    let resolution = harness
        .service
        .run(requester(), approver())
        .await
        .expect("flow should resolve");

    let Resolution::Approved(created) = resolution else {
        panic!("expected an approved resolution");
    };
    assert_eq!(created.id(), 1);

    let created_tasks = harness.backend.created_tasks();
    assert_eq!(created_tasks.len(), 1);
    let payload = &created_tasks[0];
    assert_eq!(payload.project_id, ProjectId::new(1));
    assert_eq!(payload.subject, "Provision the staging cluster");
    assert_eq!(payload.estimated_time.as_deref(), Some("PT2H30M"));
    assert_eq!(payload.start_date.as_deref(), Some("2025-06-01"));
    assert_eq!(payload.due_date.as_deref(), Some("2025-06-15"));
    assert_eq!(payload.status, TaskStatus::InProgress);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn the_created_description_embeds_the_request_context(harness: Harness) {
    harness.presenter.queue_choice(ProjectId::new(1));
    harness.presenter.queue_form(valid_form());
    harness.presenter.queue_action(approve_as(approver()));

    harness
        .service
        .run(requester(), approver())
        .await
        .expect("flow should resolve");

    let created_tasks = harness.backend.created_tasks();
    let description = &created_tasks[0].description;
    assert!(description.contains("Three nodes, default sizing."));
    assert!(description.contains("Start date: 01/06/2025"));
    assert!(description.contains("Due date: 15/06/2025"));
    assert!(description.contains("Requested by: Alice"));
    assert!(description.contains("Approved by: Bob"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approval_notifies_both_parties(harness: Harness) {
    harness.presenter.queue_choice(ProjectId::new(1));
    harness.presenter.queue_form(valid_form());
    harness.presenter.queue_action(approve_as(approver()));

    harness
        .service
        .run(requester(), approver())
        .await
        .expect("flow should resolve");

    let to_requester = harness.presenter.notifications_for(ActorId::new(10));
    assert_eq!(to_requester.len(), 2);
    assert_eq!(to_requester[0].subject, "Request sent for approval");
    assert_eq!(to_requester[1].subject, "Task approved and created");
    assert!(to_requester[1].body.contains("approved by Bob"));

    let to_approver = harness.presenter.notifications_for(ActorId::new(20));
    assert_eq!(to_approver.len(), 1);
    assert_eq!(to_approver[0].subject, "Task created");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn actions_from_bystanders_leave_the_request_pending(harness: Harness) {
    harness.presenter.queue_choice(ProjectId::new(1));
    harness.presenter.queue_form(valid_form());
    harness
        .presenter
        .queue_action(approve_as(Actor::human(ActorId::new(99), "Mallory")));
    harness.presenter.queue_action(approve_as(approver()));

    let resolution = harness
        .service
        .run(requester(), approver())
        .await
        .expect("flow should resolve");

    assert!(matches!(resolution, Resolution::Approved(_)));
    assert_eq!(harness.presenter.presented_summaries().len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejections_without_a_reason_are_not_accepted(harness: Harness) {
    harness.presenter.queue_choice(ProjectId::new(1));
    harness.presenter.queue_form(valid_form());
    harness.presenter.queue_action(reject_as(approver(), "   "));
    harness
        .presenter
        .queue_action(reject_as(approver(), "out of scope"));

    let resolution = harness
        .service
        .run(requester(), approver())
        .await
        .expect("flow should resolve");

    assert_eq!(
        resolution,
        Resolution::Rejected {
            reason: "out of scope".to_owned(),
        }
    );
    assert!(harness.backend.created_tasks().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejection_forwards_the_reason_to_the_requester(harness: Harness) {
    harness.presenter.queue_choice(ProjectId::new(1));
    harness.presenter.queue_form(valid_form());
    harness
        .presenter
        .queue_action(reject_as(approver(), "duplicate of an existing task"));

    harness
        .service
        .run(requester(), approver())
        .await
        .expect("flow should resolve");

    let to_requester = harness.presenter.notifications_for(ActorId::new(10));
    assert_eq!(to_requester.len(), 2);
    assert_eq!(to_requester[1].subject, "Task request rejected");
    assert!(to_requester[1].body.contains("duplicate of an existing task"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn backend_failure_after_approval_resolves_as_failed(harness: Harness) {
    harness
        .backend
        .set_create_failure(Some(BackendError::unavailable("connection refused")));
    harness.presenter.queue_choice(ProjectId::new(1));
    harness.presenter.queue_form(valid_form());
    harness.presenter.queue_action(approve_as(approver()));

    let resolution = harness
        .service
        .run(requester(), approver())
        .await
        .expect("flow should resolve");

    assert!(matches!(resolution, Resolution::Failed { .. }));
    let to_requester = harness.presenter.notifications_for(ActorId::new(10));
    assert_eq!(to_requester[1].subject, "Task creation failed");
    assert!(to_requester[1].body.contains("connection refused"));
    let to_approver = harness.presenter.notifications_for(ActorId::new(20));
    assert_eq!(to_approver[0].subject, "Task creation failed");
    assert!(to_approver[0].body.contains("connection refused"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn an_invalid_form_is_returned_for_correction(harness: Harness) {
    let mut bad_form = valid_form();
    bad_form.estimate = "two and a half".to_owned();
    harness.presenter.queue_choice(ProjectId::new(1));
    harness.presenter.queue_form(bad_form);
    harness.presenter.queue_form(valid_form());
    harness.presenter.queue_action(approve_as(approver()));

    let resolution = harness
        .service
        .run(requester(), approver())
        .await
        .expect("flow should resolve");

    assert!(matches!(resolution, Resolution::Approved(_)));
    let to_requester = harness.presenter.notifications_for(ActorId::new(10));
    assert_eq!(to_requester[0].subject, "Please correct the form");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_bot_approver_aborts_before_any_round_trip(harness: Harness) {
    let bot = Actor::bot(ActorId::new(3), "taskbot");

    let result = harness.service.run(requester(), bot).await;

    assert!(matches!(result, Err(WorkflowError::Validation(_))));
    assert_eq!(harness.backend.list_call_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn an_empty_project_list_aborts_the_flow(harness: Harness) {
    harness.backend.set_projects(Vec::new());

    let result = harness.service.run(requester(), approver()).await;

    assert!(matches!(result, Err(WorkflowError::NoProjectsAvailable)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_backend_listing_failure_aborts_the_flow(harness: Harness) {
    harness
        .backend
        .set_list_failure(Some(BackendError::unavailable("connection refused")));

    let result = harness.service.run(requester(), approver()).await;

    assert!(matches!(result, Err(WorkflowError::Backend(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn selecting_a_vanished_project_aborts_the_flow(harness: Harness) {
    harness.presenter.queue_choice(ProjectId::new(99));

    let result = harness.service.run(requester(), approver()).await;

    assert!(matches!(
        result,
        Err(WorkflowError::StaleSelection(id)) if id == ProjectId::new(99)
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn an_unresponsive_approver_surfaces_a_presentation_error(harness: Harness) {
    harness.presenter.queue_choice(ProjectId::new(1));
    harness.presenter.queue_form(valid_form());

    let result = harness.service.run(requester(), approver()).await;

    assert!(matches!(result, Err(WorkflowError::Presentation(_))));
}
