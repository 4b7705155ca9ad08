//! Shared world state for board move BDD scenarios.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::fixture;
use taskboard::board::{BoardController, BoardError, MoveOutcome};
use taskboard::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{
        ActivityLogEntry, Hours, NewActivity, PersistedTaskData, Task, TaskId, TaskPatch,
        TaskPriority, TaskStatus, User, UserId,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// In-memory store whose status updates can be switched to fail.
pub struct FlakyStore {
    pub inner: InMemoryTaskStore,
    reject_status_updates: AtomicBool,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: InMemoryTaskStore::new(),
            reject_status_updates: AtomicBool::new(false),
        }
    }

    /// Makes every later status update fail.
    pub fn reject_status_updates(&self) {
        self.reject_status_updates.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl TaskStore for FlakyStore {
    async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        self.inner.list_tasks().await
    }

    async fn list_tasks_for_user(&self, user_id: UserId) -> TaskStoreResult<Vec<Task>> {
        self.inner.list_tasks_for_user(user_id).await
    }

    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.inner.find_task(id).await
    }

    async fn create_task(&self, task: &Task) -> TaskStoreResult<Task> {
        self.inner.create_task(task).await
    }

    async fn update_task(
        &self,
        id: TaskId,
        patch: TaskPatch,
        acting_user: UserId,
    ) -> TaskStoreResult<Task> {
        self.inner.update_task(id, patch, acting_user).await
    }

    async fn update_task_status(
        &self,
        id: TaskId,
        status: TaskStatus,
        acting_user: UserId,
    ) -> TaskStoreResult<Task> {
        if self.reject_status_updates.load(Ordering::SeqCst) {
            return Err(TaskStoreError::persistence(std::io::Error::other(
                "status update rejected",
            )));
        }
        self.inner.update_task_status(id, status, acting_user).await
    }

    async fn log_time(
        &self,
        id: TaskId,
        hours: Hours,
        acting_user: UserId,
    ) -> TaskStoreResult<Task> {
        self.inner.log_time(id, hours, acting_user).await
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        self.inner.delete_task(id).await
    }

    async fn log_activity(&self, activity: NewActivity) -> TaskStoreResult<ActivityLogEntry> {
        self.inner.log_activity(activity).await
    }

    async fn recent_activity(&self, limit: usize) -> TaskStoreResult<Vec<ActivityLogEntry>> {
        self.inner.recent_activity(limit).await
    }

    async fn list_users(&self) -> TaskStoreResult<Vec<User>> {
        self.inner.list_users().await
    }
}

/// Scenario world for board move behaviour tests.
pub struct BoardWorld {
    pub store: Arc<FlakyStore>,
    pub actor: UserId,
    pub controller: Option<BoardController<FlakyStore>>,
    pub last_move: Option<Result<MoveOutcome, BoardError>>,
    seeded: i64,
}

impl BoardWorld {
    /// Creates a world with an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(FlakyStore::new()),
            actor: UserId::new(),
            controller: None,
            last_move: None,
            seeded: 0,
        }
    }

    /// Builds the next seeded task; earlier tasks are listed first.
    pub fn next_task(&mut self, title: String, status: TaskStatus) -> Task {
        self.seeded = self.seeded.saturating_add(1);
        Task::from_persisted(PersistedTaskData {
            id: TaskId::new(),
            title,
            description: String::new(),
            status,
            priority: TaskPriority::Medium,
            assignee: None,
            assignee_profile: None,
            created_by: self.actor,
            start_date: None,
            due_date: None,
            estimated_hours: Hours::ZERO,
            time_spent: Hours::ZERO,
            created_at: seed_instant() - Duration::minutes(self.seeded),
        })
    }

    /// Returns the loaded controller.
    ///
    /// # Errors
    ///
    /// Returns an error when no board has been loaded.
    pub fn controller(&mut self) -> Result<&mut BoardController<FlakyStore>, eyre::Report> {
        self.controller
            .as_mut()
            .ok_or_else(|| eyre::eyre!("board has not been loaded"))
    }

    /// Finds a task on the loaded board by title.
    ///
    /// # Errors
    ///
    /// Returns an error when no board is loaded or the title is unknown.
    pub fn task_on_board(&self, title: &str) -> Result<&Task, eyre::Report> {
        let controller = self
            .controller
            .as_ref()
            .ok_or_else(|| eyre::eyre!("board has not been loaded"))?;
        controller
            .board()
            .columns()
            .iter()
            .flat_map(|column| column.tasks())
            .find(|task| task.title() == title)
            .ok_or_else(|| eyre::eyre!("task {title} is not on the board"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Parses a status name used in feature files.
///
/// # Errors
///
/// Returns an error for unknown status names.
pub fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
