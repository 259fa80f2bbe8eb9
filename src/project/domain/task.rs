//! Task creation payload and creation result types.

use super::ProjectId;
use serde::{Deserialize, Serialize};

/// Initial status of every task created through taskgate.
///
/// The backend status is pinned regardless of user input; this is a policy
/// decision, not a user-configurable field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Work is underway as soon as the task exists.
    #[default]
    #[serde(rename = "in progress")]
    InProgress,
}

impl TaskStatus {
    /// Returns the backend wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in progress",
        }
    }
}

/// Payload submitted to the backend when creating a task.
///
/// Dates and the estimate are already encoded in the backend wire formats
/// (`YYYY-MM-DD` and ISO-8601 duration); the description is the composed
/// text embedding the requester and approver context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Target project identifier.
    pub project_id: ProjectId,
    /// Task subject line.
    pub subject: String,
    /// Composed task description.
    pub description: String,
    /// ISO-8601 duration estimate, when the requester supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    /// Start date in backend wire format, when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Due date in backend wire format, when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Fixed initial status.
    pub status: TaskStatus,
}

/// Reference to a task the backend confirmed it created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTask {
    id: u64,
    link: Option<String>,
}

impl CreatedTask {
    /// Creates a task reference from the backend response.
    #[must_use]
    pub const fn new(id: u64, link: Option<String>) -> Self {
        Self { id, link }
    }

    /// Returns the backend task identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the user-facing link to the task, when the backend offers one.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }
}
