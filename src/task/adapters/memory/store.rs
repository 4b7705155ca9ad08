//! In-memory task store for tests and demos.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{
        ActivityAction, ActivityLogEntry, Hours, NewActivity, Task, TaskId, TaskPatch,
        TaskStatus, User, UserId,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Tasks keep their insertion order so that listings of tasks created within
/// the same instant stay deterministic.
#[derive(Clone)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryState>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    tasks: Vec<Task>,
    users: HashMap<UserId, User>,
    activity: Vec<ActivityLogEntry>,
}

impl InMemoryTaskStore {
    /// Creates an empty store stamped by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Creates an empty store stamped by `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryState::default())),
            clock,
        }
    }

    /// Registers a user so that tasks and activity can resolve it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the lock is poisoned.
    pub fn insert_user(&self, user: User) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        state.users.insert(user.id(), user);
        Ok(())
    }

    /// Inserts a task as-is, without recording activity.
    ///
    /// Used to seed fixtures with controlled timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the identifier exists.
    pub fn seed_task(&self, task: Task) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        if state.position(task.id()).is_some() {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }
        state.tasks.push(task);
        Ok(())
    }

    fn read(&self) -> TaskStoreResult<RwLockReadGuard<'_, InMemoryState>> {
        self.state.read().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskStoreResult<RwLockWriteGuard<'_, InMemoryState>> {
        self.state.write().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    /// Mutates a stored task and appends the matching activity under one lock.
    fn mutate_task<F>(&self, id: TaskId, activity: NewActivity, mutate: F) -> TaskStoreResult<Task>
    where
        F: FnOnce(&mut Task) -> TaskStoreResult<()>,
    {
        let mut state = self.write()?;
        let index = state.position(id).ok_or(TaskStoreError::NotFound(id))?;
        let task = state
            .tasks
            .get_mut(index)
            .ok_or(TaskStoreError::NotFound(id))?;
        let mut updated = task.clone();
        mutate(&mut updated)?;
        *task = updated.clone();
        state
            .activity
            .push(ActivityLogEntry::record(activity, self.clock.utc()));
        Ok(state.enrich(updated))
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryTaskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTaskStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl InMemoryState {
    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }

    fn enrich(&self, task: Task) -> Task {
        let profile = task
            .assignee()
            .and_then(|assignee| self.users.get(&assignee))
            .map(User::profile);
        task.with_assignee_profile(profile)
    }

    fn newest_first<'a>(&self, tasks: impl Iterator<Item = &'a Task>) -> Vec<Task> {
        let mut listed: Vec<Task> = tasks.map(|task| self.enrich(task.clone())).collect();
        listed.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        listed
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state.newest_first(state.tasks.iter()))
    }

    async fn list_tasks_for_user(&self, user_id: UserId) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state.newest_first(
            state
                .tasks
                .iter()
                .filter(|task| task.assignee() == Some(user_id)),
        ))
    }

    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.read()?;
        Ok(state
            .position(id)
            .and_then(|index| state.tasks.get(index))
            .map(|task| state.enrich(task.clone())))
    }

    async fn create_task(&self, task: &Task) -> TaskStoreResult<Task> {
        let mut state = self.write()?;
        if state.position(task.id()).is_some() {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }
        state.tasks.push(task.clone());
        let activity = NewActivity::new(task.id(), task.created_by(), ActivityAction::Created);
        state
            .activity
            .push(ActivityLogEntry::record(activity, self.clock.utc()));
        Ok(state.enrich(task.clone()))
    }

    async fn update_task(
        &self,
        id: TaskId,
        patch: TaskPatch,
        acting_user: UserId,
    ) -> TaskStoreResult<Task> {
        let activity = NewActivity::new(id, acting_user, ActivityAction::Updated);
        self.mutate_task(id, activity, |task| {
            task.apply_patch(patch).map_err(TaskStoreError::Invalid)
        })
    }

    async fn update_task_status(
        &self,
        id: TaskId,
        status: TaskStatus,
        acting_user: UserId,
    ) -> TaskStoreResult<Task> {
        let activity = NewActivity::new(id, acting_user, ActivityAction::for_status_change(status));
        self.mutate_task(id, activity, |task| {
            task.set_status(status);
            Ok(())
        })
    }

    async fn log_time(
        &self,
        id: TaskId,
        hours: Hours,
        acting_user: UserId,
    ) -> TaskStoreResult<Task> {
        let activity = NewActivity::time_log(id, acting_user, hours);
        self.mutate_task(id, activity, |task| {
            task.add_time_spent(hours);
            Ok(())
        })
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        let index = state.position(id).ok_or(TaskStoreError::NotFound(id))?;
        state.tasks.remove(index);
        state.activity.retain(|entry| entry.task_id != id);
        Ok(())
    }

    async fn log_activity(&self, activity: NewActivity) -> TaskStoreResult<ActivityLogEntry> {
        let mut state = self.write()?;
        let entry = ActivityLogEntry::record(activity, self.clock.utc());
        state.activity.push(entry.clone());
        Ok(entry)
    }

    async fn recent_activity(&self, limit: usize) -> TaskStoreResult<Vec<ActivityLogEntry>> {
        let state = self.read()?;
        let mut entries: Vec<ActivityLogEntry> = state.activity.clone();
        entries.reverse();
        entries.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        entries.truncate(limit);
        for entry in &mut entries {
            entry.user_name = state
                .users
                .get(&entry.user_id)
                .map(|user| user.name().to_owned());
            entry.task_title = state
                .position(entry.task_id)
                .and_then(|index| state.tasks.get(index))
                .map(|task| task.title().to_owned());
        }
        Ok(entries)
    }

    async fn list_users(&self) -> TaskStoreResult<Vec<User>> {
        let state = self.read()?;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(users)
    }
}
