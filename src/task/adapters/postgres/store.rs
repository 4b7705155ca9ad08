//! `PostgreSQL` task store.

use super::{
    conversion::{
        row_to_activity, row_to_task, row_to_user, to_activity_row, to_changeset, to_new_row,
    },
    models::{ActivityRow, AssigneeRow, NewActivityRow, TaskRow, UserRow},
    schema::{task_logs, tasks, users},
};
use crate::task::{
    domain::{
        ActivityAction, ActivityLogEntry, Hours, NewActivity, Task, TaskId, TaskPatch, TaskStatus,
        User, UserId,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use mockable::{Clock, DefaultClock};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// `PostgreSQL` connection pool type used by the task store.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task store.
///
/// Each mutation and its activity entry are written in one transaction.
#[derive(Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl PostgresTaskStore {
    /// Creates a store stamped by the system clock.
    #[must_use]
    pub fn new(pool: TaskPgPool) -> Self {
        Self::with_clock(pool, Arc::new(DefaultClock))
    }

    /// Creates a store whose activity timestamps come from `clock`.
    #[must_use]
    pub fn with_clock(pool: TaskPgPool, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }

    fn activity_row(&self, activity: NewActivity) -> NewActivityRow {
        to_activity_row(&ActivityLogEntry::record(activity, self.clock.utc()))
    }
}

impl fmt::Debug for PostgresTaskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresTaskStore").finish_non_exhaustive()
    }
}

impl From<DieselError> for TaskStoreError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(|connection| load_tasks(connection, TaskSelection::All))
            .await
    }

    async fn list_tasks_for_user(&self, user_id: UserId) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            load_tasks(connection, TaskSelection::AssignedTo(user_id.into_inner()))
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let found = load_tasks(connection, TaskSelection::Id(id.into_inner()))?;
            Ok(found.into_iter().next())
        })
        .await
    }

    async fn create_task(&self, task: &Task) -> TaskStoreResult<Task> {
        let task_id = task.id();
        let new_row = to_new_row(task);
        let activity = self.activity_row(NewActivity::new(
            task_id,
            task.created_by(),
            ActivityAction::Created,
        ));
        debug!(%task_id, "creating task");

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskStoreError, _>(|conn| {
                diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .execute(conn)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TaskStoreError::DuplicateTask(task_id)
                        }
                        _ => TaskStoreError::persistence(err),
                    })?;
                insert_activity(conn, &activity)?;
                load_one(conn, task_id)
            })
        })
        .await
    }

    async fn update_task(
        &self,
        id: TaskId,
        patch: TaskPatch,
        acting_user: UserId,
    ) -> TaskStoreResult<Task> {
        let activity = self.activity_row(NewActivity::new(id, acting_user, ActivityAction::Updated));
        debug!(task_id = %id, "updating task");

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskStoreError, _>(|conn| {
                let row = tasks::table
                    .find(id.into_inner())
                    .select(TaskRow::as_select())
                    .for_update()
                    .first::<TaskRow>(conn)
                    .optional()?
                    .ok_or(TaskStoreError::NotFound(id))?;
                let mut task = row_to_task(row, None)?;
                task.apply_patch(patch).map_err(TaskStoreError::Invalid)?;

                diesel::update(tasks::table.find(id.into_inner()))
                    .set(&to_changeset(&task))
                    .execute(conn)?;
                insert_activity(conn, &activity)?;
                load_one(conn, id)
            })
        })
        .await
    }

    async fn update_task_status(
        &self,
        id: TaskId,
        status: TaskStatus,
        acting_user: UserId,
    ) -> TaskStoreResult<Task> {
        let activity = self.activity_row(NewActivity::new(
            id,
            acting_user,
            ActivityAction::for_status_change(status),
        ));
        debug!(task_id = %id, %status, "persisting task status");

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskStoreError, _>(|conn| {
                let updated = diesel::update(tasks::table.find(id.into_inner()))
                    .set(tasks::status.eq(status.as_str()))
                    .execute(conn)?;
                if updated == 0 {
                    return Err(TaskStoreError::NotFound(id));
                }
                insert_activity(conn, &activity)?;
                load_one(conn, id)
            })
        })
        .await
    }

    async fn log_time(
        &self,
        id: TaskId,
        hours: Hours,
        acting_user: UserId,
    ) -> TaskStoreResult<Task> {
        let activity = self.activity_row(NewActivity::time_log(id, acting_user, hours));
        debug!(task_id = %id, %hours, "logging time");

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskStoreError, _>(|conn| {
                let updated = diesel::update(tasks::table.find(id.into_inner()))
                    .set(tasks::time_spent.eq(tasks::time_spent + hours.value()))
                    .execute(conn)?;
                if updated == 0 {
                    return Err(TaskStoreError::NotFound(id));
                }
                insert_activity(conn, &activity)?;
                load_one(conn, id)
            })
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        debug!(task_id = %id, "deleting task");
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner())).execute(connection)?;
            if deleted == 0 {
                return Err(TaskStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn log_activity(&self, activity: NewActivity) -> TaskStoreResult<ActivityLogEntry> {
        let entry = ActivityLogEntry::record(activity, self.clock.utc());
        let row = to_activity_row(&entry);
        self.run_blocking(move |connection| insert_activity(connection, &row))
            .await?;
        Ok(entry)
    }

    async fn recent_activity(&self, limit: usize) -> TaskStoreResult<Vec<ActivityLogEntry>> {
        let row_limit = i64::try_from(limit).map_err(TaskStoreError::persistence)?;
        self.run_blocking(move |connection| {
            let rows = task_logs::table
                .left_join(users::table.on(task_logs::user_id.eq(users::id)))
                .left_join(tasks::table.on(task_logs::task_id.eq(tasks::id)))
                .order(task_logs::created_at.desc())
                .limit(row_limit)
                .select((
                    ActivityRow::as_select(),
                    users::name.nullable(),
                    tasks::title.nullable(),
                ))
                .load::<(ActivityRow, Option<String>, Option<String>)>(connection)?;
            rows.into_iter()
                .map(|(row, user_name, task_title)| row_to_activity(row, user_name, task_title))
                .collect()
        })
        .await
    }

    async fn list_users(&self) -> TaskStoreResult<Vec<User>> {
        self.run_blocking(|connection| {
            let rows = users::table
                .order(users::name.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }
}

enum TaskSelection {
    All,
    AssignedTo(uuid::Uuid),
    Id(uuid::Uuid),
}

fn load_tasks(connection: &mut PgConnection, selection: TaskSelection) -> TaskStoreResult<Vec<Task>> {
    let base = tasks::table
        .left_join(users::table.on(tasks::assigned_to.eq(users::id.nullable())))
        .select((TaskRow::as_select(), Option::<AssigneeRow>::as_select()))
        .order(tasks::created_at.desc())
        .into_boxed();
    let query = match selection {
        TaskSelection::All => base,
        TaskSelection::AssignedTo(user_id) => base.filter(tasks::assigned_to.eq(user_id)),
        TaskSelection::Id(task_id) => base.filter(tasks::id.eq(task_id)),
    };

    let rows = query.load::<(TaskRow, Option<AssigneeRow>)>(connection)?;
    rows.into_iter()
        .map(|(row, assignee)| row_to_task(row, assignee))
        .collect()
}

fn load_one(connection: &mut PgConnection, id: TaskId) -> TaskStoreResult<Task> {
    load_tasks(connection, TaskSelection::Id(id.into_inner()))?
        .into_iter()
        .next()
        .ok_or(TaskStoreError::NotFound(id))
}

fn insert_activity(connection: &mut PgConnection, row: &NewActivityRow) -> TaskStoreResult<()> {
    diesel::insert_into(task_logs::table)
        .values(row)
        .execute(connection)?;
    Ok(())
}
