//! Personal task list for the signed-in user.

use super::TaskQuery;
use crate::task::{
    domain::{Task, TaskId, TaskStatus, UserId},
    ports::{TaskStore, TaskStoreResult},
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Counts shown above the personal list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSummary {
    /// Tasks passing the current query.
    pub shown: usize,
    /// Tasks assigned to the user.
    pub total: usize,
}

impl fmt::Display for ListSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} tasks", self.shown, self.total)
    }
}

/// Tasks assigned to one user, with a filter and sort selection.
///
/// Status changes are written to the store before the local list changes.
pub struct MyTasksView<S>
where
    S: TaskStore,
{
    store: Arc<S>,
    user_id: UserId,
    tasks: Vec<Task>,
    query: TaskQuery,
}

impl<S> MyTasksView<S>
where
    S: TaskStore,
{
    /// Creates an empty view for `user_id`.
    #[must_use]
    pub fn new(store: Arc<S>, user_id: UserId) -> Self {
        Self {
            store,
            user_id,
            tasks: Vec::new(),
            query: TaskQuery::default(),
        }
    }

    /// Returns the user whose tasks are shown.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns every loaded task in store order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the current query.
    #[must_use]
    pub const fn query(&self) -> &TaskQuery {
        &self.query
    }

    /// Replaces the query.
    pub const fn set_query(&mut self, query: TaskQuery) {
        self.query = query;
    }

    /// Reloads the user's tasks.
    ///
    /// # Errors
    ///
    /// Returns the store failure; the previous list is kept.
    pub async fn refresh(&mut self) -> TaskStoreResult<()> {
        match self.store.list_tasks_for_user(self.user_id).await {
            Ok(tasks) => {
                debug!(user_id = %self.user_id, tasks = tasks.len(), "personal tasks loaded");
                self.tasks = tasks;
                Ok(())
            }
            Err(err) => {
                warn!(user_id = %self.user_id, error = %err, "failed to fetch personal tasks");
                Err(err)
            }
        }
    }

    /// Persists a new status and then updates the local copy.
    ///
    /// # Errors
    ///
    /// Returns the store failure; the local list is left unchanged.
    pub async fn change_status(
        &mut self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TaskStoreResult<Task> {
        let updated = self
            .store
            .update_task_status(task_id, status, self.user_id)
            .await
            .inspect_err(|err| {
                warn!(%task_id, %status, error = %err, "failed to update task status");
            })?;

        if let Some(slot) = self.tasks.iter_mut().find(|task| task.id() == task_id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Returns the tasks passing the query, in query order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Task> {
        self.query.apply(&self.tasks)
    }

    /// Returns how many tasks are shown out of the loaded total.
    #[must_use]
    pub fn summary(&self) -> ListSummary {
        ListSummary {
            shown: self.tasks.iter().filter(|task| self.query.matches(task)).count(),
            total: self.tasks.len(),
        }
    }
}
