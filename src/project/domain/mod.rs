//! Domain model for the project-management backend boundary.
//!
//! Value types produced and consumed by the backend facade: project
//! summaries, the paginated view served to selection UIs, and the task
//! creation payload with its fixed initial status.

mod pages;
mod project;
mod task;

pub use pages::ProjectPages;
pub use project::{ProjectId, ProjectSummary};
pub use task::{CreatedTask, NewTask, TaskStatus};
