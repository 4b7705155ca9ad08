//! Append-only activity log records.

use super::{ActivityId, Hours, ParseActivityActionError, TaskId, TaskStatus, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of action recorded against a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    /// The task was created.
    Created,
    /// Task fields were edited.
    Updated,
    /// The task moved to a non-completed status.
    StatusChange,
    /// Time was logged against the task.
    TimeLog,
    /// The task moved to the completed status.
    Completed,
}

impl ActivityAction {
    /// Returns the action recorded when a task moves to `status`.
    #[must_use]
    pub const fn for_status_change(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Completed => Self::Completed,
            TaskStatus::Todo | TaskStatus::InProgress => Self::StatusChange,
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::StatusChange => "status_change",
            Self::TimeLog => "time_log",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for ActivityAction {
    type Error = ParseActivityActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "status_change" => Ok(Self::StatusChange),
            "time_log" => Ok(Self::TimeLog),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseActivityActionError(value.to_owned())),
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity to append to the log.
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    /// Task the action was performed on.
    pub task_id: TaskId,
    /// User who performed the action.
    pub user_id: UserId,
    /// Recorded action.
    pub action: ActivityAction,
    /// Logged duration for [`ActivityAction::TimeLog`] entries.
    pub duration: Option<Hours>,
}

impl NewActivity {
    /// Creates an activity without a duration.
    #[must_use]
    pub const fn new(task_id: TaskId, user_id: UserId, action: ActivityAction) -> Self {
        Self {
            task_id,
            user_id,
            action,
            duration: None,
        }
    }

    /// Creates a time-log activity.
    #[must_use]
    pub const fn time_log(task_id: TaskId, user_id: UserId, duration: Hours) -> Self {
        Self {
            task_id,
            user_id,
            action: ActivityAction::TimeLog,
            duration: Some(duration),
        }
    }
}

/// Persisted activity log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    /// Entry identifier.
    pub id: ActivityId,
    /// Task the action was performed on.
    pub task_id: TaskId,
    /// User who performed the action.
    pub user_id: UserId,
    /// Recorded action.
    pub action: ActivityAction,
    /// Logged duration, if any.
    pub duration: Option<Hours>,
    /// When the action happened.
    pub created_at: DateTime<Utc>,
    /// Name of the acting user, resolved on reads.
    pub user_name: Option<String>,
    /// Title of the task, resolved on reads.
    pub task_title: Option<String>,
}

impl ActivityLogEntry {
    /// Materialises a new activity at `created_at`.
    #[must_use]
    pub fn record(activity: NewActivity, created_at: DateTime<Utc>) -> Self {
        Self {
            id: ActivityId::new(),
            task_id: activity.task_id,
            user_id: activity.user_id,
            action: activity.action,
            duration: activity.duration,
            created_at,
            user_name: None,
            task_title: None,
        }
    }
}
