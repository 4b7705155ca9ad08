//! Filtering and ordering of task lists.

use crate::task::domain::{Task, TaskPriority, TaskStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Status filter for task lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Every status passes.
    #[default]
    All,
    /// Only the given status passes.
    Only(TaskStatus),
}

impl StatusFilter {
    /// Returns whether `status` passes the filter.
    #[must_use]
    pub fn matches(self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

/// Priority filter for task lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityFilter {
    /// Every priority passes.
    #[default]
    All,
    /// Only the given priority passes.
    Only(TaskPriority),
}

impl PriorityFilter {
    /// Returns whether `priority` passes the filter.
    #[must_use]
    pub fn matches(self, priority: TaskPriority) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == priority,
        }
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Earliest due date first; undated tasks last.
    #[default]
    DueDate,
    /// Most pressing priority first.
    Priority,
    /// Newest task first.
    Created,
}

impl SortKey {
    fn compare(self, left: &Task, right: &Task) -> Ordering {
        match self {
            Self::DueDate => match (left.due_date(), right.due_date()) {
                (Some(left_due), Some(right_due)) => left_due.cmp(&right_due),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::Priority => left.priority().rank().cmp(&right.priority().rank()),
            Self::Created => right.created_at().cmp(&left.created_at()),
        }
    }
}

/// Filter and sort selection for a task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskQuery {
    /// Status filter.
    pub status: StatusFilter,
    /// Priority filter.
    pub priority: PriorityFilter,
    /// Sort order.
    pub sort: SortKey,
}

impl TaskQuery {
    /// Creates a query that shows everything ordered by due date.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the query to `status`.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = StatusFilter::Only(status);
        self
    }

    /// Restricts the query to `priority`.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = PriorityFilter::Only(priority);
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub const fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Returns whether `task` passes both filters.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.matches(task.status()) && self.priority.matches(task.priority())
    }

    /// Filters and orders `tasks`.
    ///
    /// Tasks that compare equal keep their input order.
    #[must_use]
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let mut visible: Vec<&Task> = tasks.iter().filter(|task| self.matches(task)).collect();
        visible.sort_by(|left, right| self.sort.compare(left, right));
        visible
    }
}
