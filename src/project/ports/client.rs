//! Client facade port for the project-management backend.

use crate::project::domain::{CreatedTask, NewTask, ProjectSummary};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for backend facade operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Narrow facade over the project-management backend.
///
/// Only the two calls the workflow needs. Transport, authentication, and
/// backend-side pagination are adapter concerns: implementations concatenate
/// paged listings into one ordered sequence before returning.
#[async_trait]
pub trait ProjectBackend: Send + Sync {
    /// Lists the backend's active projects in backend order.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Unavailable`] on transport or authentication
    /// failure.
    async fn list_projects(&self) -> BackendResult<Vec<ProjectSummary>>;

    /// Creates a task in the backend and returns its reference.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Unavailable`] on transport or authentication
    /// failure, or [`BackendError::Rejected`] when the backend refuses the
    /// payload.
    async fn create_task(&self, task: NewTask) -> BackendResult<CreatedTask>;
}

/// Errors returned by backend facade implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// The backend could not be reached or refused authentication.
    #[error("project-management backend unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected the submitted payload.
    #[error("project-management backend rejected the request: {0}")]
    Rejected(String),
}

impl BackendError {
    /// Wraps a transport-level failure.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    /// Wraps a backend-side rejection.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }
}
