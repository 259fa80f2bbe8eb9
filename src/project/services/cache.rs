//! Time-bounded read-through cache for the backend project list.

use crate::project::{
    domain::{ProjectPages, ProjectSummary},
    ports::{BackendError, BackendResult, ProjectBackend},
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// One refreshed project list with its refresh timestamp.
#[derive(Debug)]
struct CacheSnapshot {
    projects: Arc<Vec<ProjectSummary>>,
    refreshed_at: DateTime<Utc>,
}

/// Process-wide cache of the backend project list.
///
/// Data returned to callers is never older than the TTL: a miss or an
/// expired snapshot triggers a blocking refresh before returning. A refresh
/// replaces the whole snapshot in a single assignment, so readers observe
/// either the previous list or the new one, never a partial update. When a
/// refresh fails, the previous snapshot is served if one exists.
///
/// Created empty at process start and shared read-mostly between workflow
/// runs for the process lifetime.
pub struct ProjectCache<B, C>
where
    B: ProjectBackend,
    C: Clock + Send + Sync,
{
    backend: Arc<B>,
    clock: Arc<C>,
    ttl: TimeDelta,
    snapshot: RwLock<Option<CacheSnapshot>>,
}

impl<B, C> ProjectCache<B, C>
where
    B: ProjectBackend,
    C: Clock + Send + Sync,
{
    /// Creates an empty cache with the default one-hour TTL.
    #[must_use]
    pub fn new(backend: Arc<B>, clock: Arc<C>) -> Self {
        Self::with_ttl(backend, clock, TimeDelta::hours(1))
    }

    /// Creates an empty cache with an explicit TTL.
    #[must_use]
    pub const fn with_ttl(backend: Arc<B>, clock: Arc<C>, ttl: TimeDelta) -> Self {
        Self {
            backend,
            clock,
            ttl,
            snapshot: RwLock::new(None),
        }
    }

    /// Returns the cached project list, refreshing it first when the cache
    /// is empty or the snapshot has outlived the TTL.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Unavailable`] when a refresh fails and no
    /// previous snapshot exists to fall back on.
    pub async fn get_projects(&self) -> BackendResult<Arc<Vec<ProjectSummary>>> {
        if let Some(projects) = self.fresh_snapshot()? {
            return Ok(projects);
        }
        self.refresh().await
    }

    /// Returns a restartable paginated view over the current snapshot,
    /// refreshing it first when stale.
    ///
    /// # Errors
    ///
    /// Propagates the same errors as [`get_projects`](Self::get_projects).
    pub async fn paginate(&self, page_size: usize) -> BackendResult<ProjectPages> {
        let projects = self.get_projects().await?;
        Ok(ProjectPages::new(projects, page_size))
    }

    /// Returns the snapshot when it exists and is within the TTL.
    fn fresh_snapshot(&self) -> BackendResult<Option<Arc<Vec<ProjectSummary>>>> {
        let guard = self.snapshot.read().map_err(|_| poisoned())?;
        let now = self.clock.utc();
        Ok(guard
            .as_ref()
            .filter(|snapshot| now.signed_duration_since(snapshot.refreshed_at) <= self.ttl)
            .map(|snapshot| Arc::clone(&snapshot.projects)))
    }

    /// Fetches the project list and replaces the snapshot atomically.
    ///
    /// Safe to race: concurrent refreshes each assign a complete snapshot,
    /// so the last writer wins and readers never see a partial list.
    async fn refresh(&self) -> BackendResult<Arc<Vec<ProjectSummary>>> {
        match self.backend.list_projects().await {
            Ok(listing) => {
                let projects = Arc::new(listing);
                let refreshed_at = self.clock.utc();
                let mut guard = self.snapshot.write().map_err(|_| poisoned())?;
                *guard = Some(CacheSnapshot {
                    projects: Arc::clone(&projects),
                    refreshed_at,
                });
                info!(count = projects.len(), "project cache refreshed");
                Ok(projects)
            }
            Err(err) => {
                warn!(error = %err, "project list refresh failed");
                let guard = self.snapshot.read().map_err(|_| poisoned())?;
                guard
                    .as_ref()
                    .map_or(Err(err), |snapshot| Ok(Arc::clone(&snapshot.projects)))
            }
        }
    }
}

/// Maps a poisoned cache lock to a backend-unavailable error.
fn poisoned() -> BackendError {
    BackendError::unavailable("project cache lock poisoned")
}
