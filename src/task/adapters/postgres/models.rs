//! Diesel row models for task persistence.

use super::schema::{task_logs, tasks, users};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Workflow status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Assigned user.
    pub assigned_to: Option<uuid::Uuid>,
    /// Creating user.
    pub created_by: uuid::Uuid,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Estimated effort in hours.
    pub estimated_hours: f64,
    /// Accumulated time in hours.
    pub time_spent: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Workflow status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Assigned user.
    pub assigned_to: Option<uuid::Uuid>,
    /// Creating user.
    pub created_by: uuid::Uuid,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Estimated effort in hours.
    pub estimated_hours: f64,
    /// Accumulated time in hours.
    pub time_spent: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Changeset for editable task columns.
///
/// `None` clears nullable columns rather than skipping them.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Workflow status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Assigned user.
    pub assigned_to: Option<uuid::Uuid>,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Estimated effort in hours.
    pub estimated_hours: f64,
    /// Accumulated time in hours.
    pub time_spent: f64,
}

/// Assignee columns joined onto task reads.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssigneeRow {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

/// Query result row for users.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Organisation role.
    pub role: String,
}

/// Query result row for activity entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Task the action was performed on.
    pub task_id: uuid::Uuid,
    /// Acting user.
    pub user_id: uuid::Uuid,
    /// Recorded action.
    pub action: String,
    /// Logged duration in hours.
    pub duration: Option<f64>,
    /// Entry timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for activity entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_logs)]
pub struct NewActivityRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Task the action was performed on.
    pub task_id: uuid::Uuid,
    /// Acting user.
    pub user_id: uuid::Uuid,
    /// Recorded action.
    pub action: String,
    /// Logged duration in hours.
    pub duration: Option<f64>,
    /// Entry timestamp.
    pub created_at: DateTime<Utc>,
}
