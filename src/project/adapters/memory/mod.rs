//! In-memory backend facade for tests.

use crate::project::{
    domain::{CreatedTask, NewTask, ProjectSummary},
    ports::{BackendError, BackendResult, ProjectBackend},
};
use async_trait::async_trait;
use std::sync::RwLock;

/// Thread-safe in-memory implementation of [`ProjectBackend`].
///
/// Serves a configurable project list, records every created task, counts
/// listing calls, and injects failures on demand.
#[derive(Debug, Default)]
pub struct InMemoryProjectBackend {
    state: RwLock<BackendState>,
}

#[derive(Debug, Default)]
struct BackendState {
    projects: Vec<ProjectSummary>,
    created: Vec<NewTask>,
    list_calls: usize,
    next_task_id: u64,
    list_failure: Option<BackendError>,
    create_failure: Option<BackendError>,
}

impl InMemoryProjectBackend {
    /// Creates a backend with an empty project list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend serving the given project list.
    #[must_use]
    pub fn with_projects(projects: Vec<ProjectSummary>) -> Self {
        let backend = Self::new();
        backend.set_projects(projects);
        backend
    }

    /// Replaces the served project list.
    ///
    /// # Panics
    ///
    /// Panics when the internal lock is poisoned; test-double state is never
    /// shared across panicking threads in practice.
    pub fn set_projects(&self, projects: Vec<ProjectSummary>) {
        self.with_state(|state| state.projects = projects);
    }

    /// Makes every subsequent listing call fail with the given error.
    ///
    /// # Panics
    ///
    /// Panics when the internal lock is poisoned.
    pub fn set_list_failure(&self, failure: Option<BackendError>) {
        self.with_state(|state| state.list_failure = failure);
    }

    /// Makes every subsequent creation call fail with the given error.
    ///
    /// # Panics
    ///
    /// Panics when the internal lock is poisoned.
    pub fn set_create_failure(&self, failure: Option<BackendError>) {
        self.with_state(|state| state.create_failure = failure);
    }

    /// Returns how many times the project list was fetched.
    ///
    /// # Panics
    ///
    /// Panics when the internal lock is poisoned.
    #[must_use]
    pub fn list_call_count(&self) -> usize {
        self.read_state(|state| state.list_calls)
    }

    /// Returns the payloads of every task created so far.
    ///
    /// # Panics
    ///
    /// Panics when the internal lock is poisoned.
    #[must_use]
    pub fn created_tasks(&self) -> Vec<NewTask> {
        self.read_state(|state| state.created.clone())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut BackendState) -> T) -> T {
        #[expect(clippy::unwrap_used, reason = "test double; poisoned lock is a test bug")]
        let mut guard = self.state.write().unwrap();
        f(&mut guard)
    }

    fn read_state<T>(&self, f: impl FnOnce(&BackendState) -> T) -> T {
        #[expect(clippy::unwrap_used, reason = "test double; poisoned lock is a test bug")]
        let guard = self.state.read().unwrap();
        f(&guard)
    }
}

#[async_trait]
impl ProjectBackend for InMemoryProjectBackend {
    async fn list_projects(&self) -> BackendResult<Vec<ProjectSummary>> {
        self.with_state(|state| {
            state.list_calls += 1;
            state
                .list_failure
                .clone()
                .map_or_else(|| Ok(state.projects.clone()), Err)
        })
    }

    async fn create_task(&self, task: NewTask) -> BackendResult<CreatedTask> {
        self.with_state(|state| {
            if let Some(failure) = state.create_failure.clone() {
                return Err(failure);
            }
            state.next_task_id += 1;
            let id = state.next_task_id;
            state.created.push(task);
            Ok(CreatedTask::new(
                id,
                Some(format!("https://backend.example/work_packages/{id}")),
            ))
        })
    }
}
