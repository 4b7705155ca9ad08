//! Conversions between Diesel rows and task domain values.
//!
//! Stored strings and hour values are re-validated on the way in; a row that
//! fails validation surfaces as [`TaskStoreError::Persistence`].

use super::models::{
    ActivityRow, AssigneeRow, NewActivityRow, NewTaskRow, TaskChangeset, TaskRow, UserRow,
};
use crate::task::{
    domain::{
        ActivityAction, ActivityId, ActivityLogEntry, Hours, PersistedTaskData, Task, TaskId,
        TaskPriority, TaskStatus, User, UserId, UserProfile, UserRole,
    },
    ports::{TaskStoreError, TaskStoreResult},
};

pub(crate) fn to_activity_row(entry: &ActivityLogEntry) -> NewActivityRow {
    NewActivityRow {
        id: entry.id.into_inner(),
        task_id: entry.task_id.into_inner(),
        user_id: entry.user_id.into_inner(),
        action: entry.action.as_str().to_owned(),
        duration: entry.duration.map(Hours::value),
        created_at: entry.created_at,
    }
}

pub(crate) fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        assigned_to: task.assignee().map(UserId::into_inner),
        created_by: task.created_by().into_inner(),
        start_date: task.start_date(),
        due_date: task.due_date(),
        estimated_hours: task.estimated_hours().value(),
        time_spent: task.time_spent().value(),
        created_at: task.created_at(),
    }
}

pub(crate) fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        assigned_to: task.assignee().map(UserId::into_inner),
        start_date: task.start_date(),
        due_date: task.due_date(),
        estimated_hours: task.estimated_hours().value(),
        time_spent: task.time_spent().value(),
    }
}

pub(crate) fn row_to_task(row: TaskRow, assignee: Option<AssigneeRow>) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status: persisted_status,
        priority: persisted_priority,
        assigned_to,
        created_by,
        start_date,
        due_date,
        estimated_hours,
        time_spent,
        created_at,
    } = row;

    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(TaskStoreError::persistence)?;
    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(TaskStoreError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        status,
        priority,
        assignee: assigned_to.map(UserId::from_uuid),
        assignee_profile: assignee.map(|profile| UserProfile {
            name: profile.name,
            email: profile.email,
        }),
        created_by: UserId::from_uuid(created_by),
        start_date,
        due_date,
        estimated_hours: Hours::new(estimated_hours).map_err(TaskStoreError::persistence)?,
        time_spent: Hours::new(time_spent).map_err(TaskStoreError::persistence)?,
        created_at,
    };
    Ok(Task::from_persisted(data))
}

pub(crate) fn row_to_activity(
    row: ActivityRow,
    user_name: Option<String>,
    task_title: Option<String>,
) -> TaskStoreResult<ActivityLogEntry> {
    Ok(ActivityLogEntry {
        id: ActivityId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        user_id: UserId::from_uuid(row.user_id),
        action: ActivityAction::try_from(row.action.as_str())
            .map_err(TaskStoreError::persistence)?,
        duration: row
            .duration
            .map(Hours::new)
            .transpose()
            .map_err(TaskStoreError::persistence)?,
        created_at: row.created_at,
        user_name,
        task_title,
    })
}

pub(crate) fn row_to_user(row: UserRow) -> TaskStoreResult<User> {
    let role = UserRole::try_from(row.role.as_str()).map_err(TaskStoreError::persistence)?;
    User::with_id(UserId::from_uuid(row.id), row.name, row.email, role)
        .map_err(TaskStoreError::persistence)
}
