//! Dashboard snapshots built from the task store.

use super::TaskStats;
use crate::task::{
    domain::ActivityLogEntry,
    ports::{TaskStore, TaskStoreResult},
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default number of activity entries shown on the dashboard.
pub const DEFAULT_ACTIVITY_LIMIT: usize = 10;

/// Counters and recent activity shown together on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// Aggregated counters.
    pub stats: TaskStats,
    /// Most recent activity, newest first.
    pub recent_activity: Vec<ActivityLogEntry>,
}

/// Builds dashboard snapshots.
#[derive(Clone)]
pub struct DashboardService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    activity_limit: usize,
}

impl<S, C> DashboardService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a service showing [`DEFAULT_ACTIVITY_LIMIT`] activity entries.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
        }
    }

    /// Overrides the number of activity entries per snapshot.
    #[must_use]
    pub const fn with_activity_limit(mut self, activity_limit: usize) -> Self {
        self.activity_limit = activity_limit;
        self
    }

    /// Returns the configured activity limit.
    #[must_use]
    pub const fn activity_limit(&self) -> usize {
        self.activity_limit
    }

    /// Reads counters relative to the current UTC date and the latest
    /// activity.
    ///
    /// # Errors
    ///
    /// Returns the first store failure.
    pub async fn snapshot(&self) -> TaskStoreResult<DashboardSnapshot> {
        let today = self.clock.utc().date_naive();
        let stats = self.store.task_stats(today).await?;
        let recent_activity = self.store.recent_activity(self.activity_limit).await?;
        debug!(%today, activity = recent_activity.len(), "dashboard snapshot built");
        Ok(DashboardSnapshot {
            stats,
            recent_activity,
        })
    }
}

/// Dashboard view state.
pub struct Dashboard<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    service: DashboardService<S, C>,
    snapshot: Option<DashboardSnapshot>,
}

impl<S, C> Dashboard<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a dashboard with nothing loaded.
    #[must_use]
    pub const fn new(service: DashboardService<S, C>) -> Self {
        Self {
            service,
            snapshot: None,
        }
    }

    /// Returns the last snapshot that loaded successfully.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.snapshot.as_ref()
    }

    /// Reloads the snapshot.
    ///
    /// # Errors
    ///
    /// Returns the store failure; the previous snapshot is kept.
    pub async fn refresh(&mut self) -> TaskStoreResult<()> {
        match self.service.snapshot().await {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load dashboard; keeping previous snapshot");
                Err(err)
            }
        }
    }
}
