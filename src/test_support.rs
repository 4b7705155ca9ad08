//! Task builders and store doubles shared by unit tests.

use crate::task::{
    domain::{
        ActivityLogEntry, Hours, NewActivity, PersistedTaskData, Task, TaskId, TaskPatch,
        TaskPriority, TaskStatus, User, UserId,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use mockall::mock;

mock! {
    pub Store {}

    #[async_trait]
    impl TaskStore for Store {
        async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>>;
        async fn list_tasks_for_user(&self, user_id: UserId) -> TaskStoreResult<Vec<Task>>;
        async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;
        async fn create_task(&self, task: &Task) -> TaskStoreResult<Task>;
        async fn update_task(
            &self,
            id: TaskId,
            patch: TaskPatch,
            acting_user: UserId,
        ) -> TaskStoreResult<Task>;
        async fn update_task_status(
            &self,
            id: TaskId,
            status: TaskStatus,
            acting_user: UserId,
        ) -> TaskStoreResult<Task>;
        async fn log_time(
            &self,
            id: TaskId,
            hours: Hours,
            acting_user: UserId,
        ) -> TaskStoreResult<Task>;
        async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()>;
        async fn log_activity(&self, activity: NewActivity) -> TaskStoreResult<ActivityLogEntry>;
        async fn recent_activity(&self, limit: usize) -> TaskStoreResult<Vec<ActivityLogEntry>>;
        async fn list_users(&self) -> TaskStoreResult<Vec<User>>;
    }
}

/// Simulated backend outage.
pub fn outage() -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other("connection reset"))
}

/// Builds a calendar date, panicking on invalid input.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

fn base_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
        .single()
        .expect("valid base instant")
}

/// Persisted-task builder with deterministic defaults.
pub struct TaskBuilder {
    data: PersistedTaskData,
}

impl TaskBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            data: PersistedTaskData {
                id: TaskId::new(),
                title: title.to_owned(),
                description: String::new(),
                status: TaskStatus::Todo,
                priority: TaskPriority::Medium,
                assignee: None,
                assignee_profile: None,
                created_by: UserId::new(),
                start_date: None,
                due_date: None,
                estimated_hours: Hours::ZERO,
                time_spent: Hours::ZERO,
                created_at: base_instant(),
            },
        }
    }

    pub const fn status(mut self, status: TaskStatus) -> Self {
        self.data.status = status;
        self
    }

    pub const fn priority(mut self, priority: TaskPriority) -> Self {
        self.data.priority = priority;
        self
    }

    pub const fn due(mut self, due_date: NaiveDate) -> Self {
        self.data.due_date = Some(due_date);
        self
    }

    pub const fn assignee(mut self, assignee: UserId) -> Self {
        self.data.assignee = Some(assignee);
        self
    }

    /// Shifts the creation time `minutes` after the shared base instant.
    pub fn created_after(mut self, minutes: i64) -> Self {
        self.data.created_at = base_instant() + Duration::minutes(minutes);
        self
    }

    pub fn build(self) -> Task {
        Task::from_persisted(self.data)
    }
}

/// Returns the titles of `tasks` in order.
pub fn titles<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<&'a str> {
    tasks.into_iter().map(Task::title).collect()
}
