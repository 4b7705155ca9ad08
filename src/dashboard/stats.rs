//! Summary counters for the dashboard.

use crate::task::domain::{Task, TaskPriority, TaskStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task counts per priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    /// Urgent tasks.
    pub urgent: u64,
    /// High-priority tasks.
    pub high: u64,
    /// Medium-priority tasks.
    pub medium: u64,
    /// Low-priority tasks.
    pub low: u64,
}

impl PriorityBreakdown {
    /// Returns the count for `priority`.
    #[must_use]
    pub const fn get(&self, priority: TaskPriority) -> u64 {
        match priority {
            TaskPriority::Urgent => self.urgent,
            TaskPriority::High => self.high,
            TaskPriority::Medium => self.medium,
            TaskPriority::Low => self.low,
        }
    }

    /// Returns `(priority, count)` pairs from most to least pressing.
    pub fn iter(&self) -> impl Iterator<Item = (TaskPriority, u64)> + '_ {
        TaskPriority::ALL
            .into_iter()
            .map(|priority| (priority, self.get(priority)))
    }

    const fn increment(&mut self, priority: TaskPriority) {
        let slot = match priority {
            TaskPriority::Urgent => &mut self.urgent,
            TaskPriority::High => &mut self.high,
            TaskPriority::Medium => &mut self.medium,
            TaskPriority::Low => &mut self.low,
        };
        *slot = slot.saturating_add(1);
    }
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskStats {
    /// Tasks due today.
    pub today: u64,
    /// Unfinished tasks whose due date has passed.
    pub overdue: u64,
    /// Completed tasks.
    pub completed: u64,
    /// Tasks in progress.
    pub in_progress: u64,
    /// Tasks per priority.
    pub by_priority: PriorityBreakdown,
}

/// Reduces `tasks` into dashboard counters relative to `today`.
///
/// A task contributes to every counter it qualifies for, so an overdue task
/// in progress counts towards both `overdue` and `in_progress`.
#[must_use]
pub fn compute_stats(tasks: &[Task], today: NaiveDate) -> TaskStats {
    tasks.iter().fold(TaskStats::default(), |mut stats, task| {
        match task.status() {
            TaskStatus::Completed => stats.completed = stats.completed.saturating_add(1),
            TaskStatus::InProgress => stats.in_progress = stats.in_progress.saturating_add(1),
            TaskStatus::Todo => {}
        }

        if let Some(due) = task.due_date() {
            if due == today {
                stats.today = stats.today.saturating_add(1);
            } else if due < today && task.status() != TaskStatus::Completed {
                stats.overdue = stats.overdue.saturating_add(1);
            }
        }

        stats.by_priority.increment(task.priority());
        stats
    })
}
