//! Service layer for task creation, editing and workflow changes.

use crate::task::{
    domain::{
        Hours, Task, TaskDetails, TaskDomainError, TaskId, TaskPatch, TaskPriority, TaskStatus,
        User, UserId,
    },
    ports::{TaskStore, TaskStoreError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    assignee: Option<UserId>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    estimated_hours: f64,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            assignee: None,
            start_date: None,
            due_date: None,
            estimated_hours: 0.0,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Assigns the task.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the planned start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the effort estimate in hours.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> TaskLifecycleService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a task authored by `creator`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when validation fails or the store
    /// rejects the task.
    pub async fn create_task(
        &self,
        request: CreateTaskRequest,
        creator: UserId,
    ) -> TaskLifecycleResult<Task> {
        let details = TaskDetails {
            title: request.title,
            description: request.description,
            status: request.status,
            priority: request.priority,
            assignee: request.assignee,
            start_date: request.start_date,
            due_date: request.due_date,
            estimated_hours: Hours::new(request.estimated_hours)?,
        };
        let task = Task::new(details, creator, &*self.clock)?;
        debug!(task_id = %task.id(), %creator, "creating task");
        Ok(self.store.create_task(&task).await?)
    }

    /// Applies a partial update on behalf of `acting_user`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the patch sets a blank
    /// title and [`TaskLifecycleError::Store`] when the store fails.
    pub async fn update_task(
        &self,
        id: TaskId,
        patch: TaskPatch,
        acting_user: UserId,
    ) -> TaskLifecycleResult<Task> {
        patch.validate()?;
        Ok(self.store.update_task(id, patch, acting_user).await?)
    }

    /// Moves a task to `status` on behalf of `acting_user`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the store fails.
    pub async fn update_status(
        &self,
        id: TaskId,
        status: TaskStatus,
        acting_user: UserId,
    ) -> TaskLifecycleResult<Task> {
        Ok(self.store.update_task_status(id, status, acting_user).await?)
    }

    /// Adds `hours` to the time spent on a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for negative or non-finite
    /// hours and [`TaskLifecycleError::Store`] when the store fails.
    pub async fn log_time(
        &self,
        id: TaskId,
        hours: f64,
        acting_user: UserId,
    ) -> TaskLifecycleResult<Task> {
        let logged = Hours::new(hours)?;
        Ok(self.store.log_time(id, logged, acting_user).await?)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the store fails.
    pub async fn delete_task(&self, id: TaskId) -> TaskLifecycleResult<()> {
        Ok(self.store.delete_task(id).await?)
    }

    /// Returns every task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the store fails.
    pub async fn list_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.store.list_tasks().await?)
    }

    /// Returns the tasks assigned to `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the store fails.
    pub async fn tasks_for_user(&self, user_id: UserId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.store.list_tasks_for_user(user_id).await?)
    }

    /// Returns users available for assignment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the store fails.
    pub async fn users(&self) -> TaskLifecycleResult<Vec<User>> {
        Ok(self.store.list_users().await?)
    }
}
