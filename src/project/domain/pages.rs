//! Paginated view over a project list snapshot.

use super::{ProjectId, ProjectSummary};
use std::sync::Arc;

/// Restartable paginated view over an immutable project list snapshot.
///
/// Pages preserve the snapshot's order and cover it exactly once. The view
/// holds the snapshot it was created from, so iterating is unaffected by
/// later cache refreshes; calling [`iter`](Self::iter) again restarts from
/// the first page.
#[derive(Debug, Clone)]
pub struct ProjectPages {
    projects: Arc<Vec<ProjectSummary>>,
    page_size: usize,
}

impl ProjectPages {
    /// Creates a paginated view with the given page size.
    ///
    /// A page size of zero is treated as one.
    #[must_use]
    pub fn new(projects: Arc<Vec<ProjectSummary>>, page_size: usize) -> Self {
        Self {
            projects,
            page_size: page_size.max(1),
        }
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the total number of projects in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Returns `true` when the snapshot holds no projects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Returns the number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.projects.len().div_ceil(self.page_size)
    }

    /// Iterates over the pages, each at most `page_size` projects.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &[ProjectSummary]> {
        self.projects.chunks(self.page_size)
    }

    /// Looks up a project by identifier within the snapshot.
    #[must_use]
    pub fn find(&self, id: ProjectId) -> Option<&ProjectSummary> {
        self.projects.iter().find(|project| project.id() == id)
    }
}
