//! Task aggregate root and related workflow types.

use super::{
    Hours, ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError, TaskId, UserId,
    UserProfile,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    Todo,
    /// Work is underway.
    InProgress,
    /// Work is finished.
    Completed,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Completed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Returns the human-readable column title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Must be handled immediately.
    Urgent,
    /// Important.
    High,
    /// Normal importance.
    #[default]
    Medium,
    /// Can wait.
    Low,
}

impl TaskPriority {
    /// All priorities from most to least pressing.
    pub const ALL: [Self; 4] = [Self::Urgent, Self::High, Self::Medium, Self::Low];

    /// Returns the sort rank; lower ranks are more pressing.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Urgent => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "urgent" => Ok(Self::Urgent),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied fields for a new task.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskDetails {
    /// Task title; must not be blank.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Initial status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Assigned user, if any.
    pub assignee: Option<UserId>,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Estimated effort.
    pub estimated_hours: Hours,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    assignee: Option<UserId>,
    assignee_profile: Option<UserProfile>,
    created_by: UserId,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    estimated_hours: Hours,
    time_spent: Hours,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted assignee reference.
    pub assignee: Option<UserId>,
    /// Resolved assignee profile, when the read joined it.
    pub assignee_profile: Option<UserProfile>,
    /// Persisted creator reference.
    pub created_by: UserId,
    /// Persisted start date.
    pub start_date: Option<NaiveDate>,
    /// Persisted due date.
    pub due_date: Option<NaiveDate>,
    /// Persisted effort estimate.
    pub estimated_hours: Hours,
    /// Persisted accumulated time.
    pub time_spent: Hours,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task authored by `created_by`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(
        details: TaskDetails,
        created_by: UserId,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let title = normalize_title(&details.title)?;
        Ok(Self {
            id: TaskId::new(),
            title,
            description: details.description,
            status: details.status,
            priority: details.priority,
            assignee: details.assignee,
            assignee_profile: None,
            created_by,
            start_date: details.start_date,
            due_date: details.due_date,
            estimated_hours: details.estimated_hours,
            time_spent: Hours::ZERO,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            assignee: data.assignee,
            assignee_profile: data.assignee_profile,
            created_by: data.created_by,
            start_date: data.start_date,
            due_date: data.due_date,
            estimated_hours: data.estimated_hours,
            time_spent: data.time_spent,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the assigned user, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the resolved assignee profile, if the store provided one.
    #[must_use]
    pub const fn assignee_profile(&self) -> Option<&UserProfile> {
        self.assignee_profile.as_ref()
    }

    /// Returns the creator.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the planned start date.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the estimated effort.
    #[must_use]
    pub const fn estimated_hours(&self) -> Hours {
        self.estimated_hours
    }

    /// Returns the time spent so far.
    #[must_use]
    pub const fn time_spent(&self) -> Hours {
        self.time_spent
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns a copy carrying the given assignee profile.
    #[must_use]
    pub fn with_assignee_profile(mut self, profile: Option<UserProfile>) -> Self {
        self.assignee_profile = profile;
        self
    }

    /// Sets the workflow status.
    ///
    /// Any status may follow any other; the board moves tasks freely between
    /// columns.
    pub const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Adds logged time to the accumulated total.
    pub fn add_time_spent(&mut self, hours: Hours) {
        self.time_spent = self.time_spent.saturating_add(hours);
    }

    /// Applies a partial update.
    ///
    /// The task is left untouched when validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the patch sets a blank
    /// title.
    pub fn apply_patch(&mut self, patch: TaskPatch) -> Result<(), TaskDomainError> {
        let title = patch.title.as_deref().map(normalize_title).transpose()?;
        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(assignee) = patch.assignee {
            if assignee != self.assignee {
                self.assignee_profile = None;
            }
            self.assignee = assignee;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(estimated_hours) = patch.estimated_hours {
            self.estimated_hours = estimated_hours;
        }
        if let Some(time_spent) = patch.time_spent {
            self.time_spent = time_spent;
        }
        Ok(())
    }
}

/// Partial update for a task. Unset fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    assignee: Option<Option<UserId>>,
    start_date: Option<Option<NaiveDate>>,
    due_date: Option<Option<NaiveDate>>,
    estimated_hours: Option<Hours>,
    time_spent: Option<Hours>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks the patch against the domain rules without applying it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the patch sets a blank
    /// title.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        self.title.as_deref().map(normalize_title).transpose()?;
        Ok(())
    }

    /// Returns whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets or clears the assignee.
    #[must_use]
    pub const fn assignee(mut self, assignee: Option<UserId>) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets or clears the start date.
    #[must_use]
    pub const fn start_date(mut self, start_date: Option<NaiveDate>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the effort estimate.
    #[must_use]
    pub const fn estimated_hours(mut self, hours: Hours) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Overwrites the accumulated time.
    #[must_use]
    pub const fn time_spent(mut self, hours: Hours) -> Self {
        self.time_spent = Some(hours);
        self
    }
}

fn normalize_title(raw: &str) -> Result<String, TaskDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}
