//! Unit tests for project domain value types and wire payload shape.

use crate::project::domain::{CreatedTask, NewTask, ProjectId, ProjectPages, ProjectSummary, TaskStatus};
use rstest::rstest;
use std::sync::Arc;

fn summaries(count: u64) -> Vec<ProjectSummary> {
    (1..=count)
        .map(|n| ProjectSummary::new(ProjectId::new(n), format!("Project {n}")))
        .collect()
}

#[rstest]
fn pagination_of_57_items_yields_pages_25_25_7() {
    let pages = ProjectPages::new(Arc::new(summaries(57)), 25);

    assert_eq!(pages.page_count(), 3);
    let sizes: Vec<usize> = pages.iter().map(<[ProjectSummary]>::len).collect();
    assert_eq!(sizes, vec![25, 25, 7]);
}

#[rstest]
fn pagination_covers_all_items_once_in_order() {
    let projects = summaries(57);
    let pages = ProjectPages::new(Arc::new(projects.clone()), 25);

    let flattened: Vec<ProjectSummary> = pages.iter().flatten().cloned().collect();
    assert_eq!(flattened, projects);
}

#[rstest]
fn pagination_is_restartable() {
    let pages = ProjectPages::new(Arc::new(summaries(30)), 25);

    let first_pass: Vec<usize> = pages.iter().map(<[ProjectSummary]>::len).collect();
    let second_pass: Vec<usize> = pages.iter().map(<[ProjectSummary]>::len).collect();
    assert_eq!(first_pass, second_pass);
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(25, 1)]
#[case(26, 2)]
fn page_count_matches_item_count(#[case] items: u64, #[case] expected_pages: usize) {
    let pages = ProjectPages::new(Arc::new(summaries(items)), 25);
    assert_eq!(pages.page_count(), expected_pages);
}

#[rstest]
fn zero_page_size_is_clamped_to_one() {
    let pages = ProjectPages::new(Arc::new(summaries(3)), 0);
    assert_eq!(pages.page_size(), 1);
    assert_eq!(pages.page_count(), 3);
}

#[rstest]
fn find_locates_projects_by_identifier() {
    let pages = ProjectPages::new(Arc::new(summaries(5)), 25);

    let found = pages.find(ProjectId::new(3));
    assert_eq!(found.map(ProjectSummary::name), Some("Project 3"));
    assert!(pages.find(ProjectId::new(99)).is_none());
}

#[rstest]
#[expect(
    clippy::panic_in_result_fn,
    reason = "Test uses assertions for verification while returning Result for error propagation"
)]
fn new_task_serializes_camel_case_and_omits_absent_fields() -> eyre::Result<()> {
    let task = NewTask {
        project_id: ProjectId::new(7),
        subject: "Ship the release".to_owned(),
        description: "Cut and publish".to_owned(),
        estimated_time: Some("PT2H30M".to_owned()),
        start_date: Some("2025-06-01".to_owned()),
        due_date: None,
        status: TaskStatus::InProgress,
    };

    let value = serde_json::to_value(&task)?;
    assert_eq!(value.get("projectId"), Some(&serde_json::json!(7)));
    assert_eq!(
        value.get("subject"),
        Some(&serde_json::json!("Ship the release"))
    );
    assert_eq!(
        value.get("estimatedTime"),
        Some(&serde_json::json!("PT2H30M"))
    );
    assert_eq!(value.get("startDate"), Some(&serde_json::json!("2025-06-01")));
    assert_eq!(
        value.get("status"),
        Some(&serde_json::json!(TaskStatus::InProgress.as_str()))
    );
    assert!(value.get("dueDate").is_none());
    Ok(())
}

#[rstest]
fn task_status_is_pinned_to_in_progress() {
    assert_eq!(TaskStatus::default(), TaskStatus::InProgress);
    assert_eq!(TaskStatus::InProgress.as_str(), "in progress");
}

#[rstest]
fn created_task_exposes_id_and_link() {
    let created = CreatedTask::new(42, Some("https://backend.example/wp/42".to_owned()));
    assert_eq!(created.id(), 42);
    assert_eq!(created.link(), Some("https://backend.example/wp/42"));

    let bare = CreatedTask::new(7, None);
    assert!(bare.link().is_none());
}
