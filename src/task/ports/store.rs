//! Store port for task persistence, activity logging and aggregation.

use crate::dashboard::{TaskStats, compute_stats};
use crate::task::domain::{
    ActivityLogEntry, Hours, NewActivity, Task, TaskDomainError, TaskId, TaskPatch, TaskStatus,
    User, UserId,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task record service contract.
///
/// Reads return tasks enriched with the resolved assignee profile, newest
/// first. Every mutation except [`TaskStore::delete_task`] appends an
/// activity entry as part of the same operation.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every task.
    async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>>;

    /// Returns the tasks assigned to `user_id`.
    async fn list_tasks_for_user(&self, user_id: UserId) -> TaskStoreResult<Vec<Task>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Stores a new task and records a `created` activity by its creator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the identifier is
    /// already taken.
    async fn create_task(&self, task: &Task) -> TaskStoreResult<Task>;

    /// Applies a partial update and records an `updated` activity.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist and
    /// [`TaskStoreError::Invalid`] when the patch fails validation.
    async fn update_task(
        &self,
        id: TaskId,
        patch: TaskPatch,
        acting_user: UserId,
    ) -> TaskStoreResult<Task>;

    /// Persists a new status.
    ///
    /// Records `completed` when the status is [`TaskStatus::Completed`] and
    /// `status_change` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update_task_status(
        &self,
        id: TaskId,
        status: TaskStatus,
        acting_user: UserId,
    ) -> TaskStoreResult<Task>;

    /// Adds `hours` to the time spent and records a `time_log` activity.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn log_time(
        &self,
        id: TaskId,
        hours: Hours,
        acting_user: UserId,
    ) -> TaskStoreResult<Task>;

    /// Deletes a task together with its activity.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Appends an activity entry.
    async fn log_activity(&self, activity: NewActivity) -> TaskStoreResult<ActivityLogEntry>;

    /// Returns up to `limit` activity entries, newest first, enriched with
    /// the user name and task title.
    async fn recent_activity(&self, limit: usize) -> TaskStoreResult<Vec<ActivityLogEntry>>;

    /// Aggregates dashboard counters relative to `today`.
    async fn task_stats(&self, today: NaiveDate) -> TaskStoreResult<TaskStats> {
        let tasks = self.list_tasks().await?;
        Ok(compute_stats(&tasks, today))
    }

    /// Returns every user, ordered by name.
    async fn list_users(&self) -> TaskStoreResult<Vec<User>>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The requested change fails domain validation.
    #[error("invalid task change: {0}")]
    Invalid(#[from] TaskDomainError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
