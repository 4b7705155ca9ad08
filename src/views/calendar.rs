//! Month view of task deadlines.

use crate::task::domain::Task;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while building a calendar month.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CalendarError {
    /// The year and month do not name a representable month.
    #[error("invalid calendar month {year}-{month}")]
    InvalidMonth {
        /// Requested year.
        year: i32,
        /// Requested month, 1-based.
        month: u32,
    },
}

/// Tasks due on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay<'a> {
    /// The day.
    pub date: NaiveDate,
    /// Tasks due that day, in input order.
    pub tasks: Vec<&'a Task>,
}

/// Tasks due within one month, grouped by day.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMonth<'a> {
    first_day: NaiveDate,
    days: Vec<CalendarDay<'a>>,
}

impl<'a> CalendarMonth<'a> {
    /// Groups the tasks due in `year`-`month` by due date.
    ///
    /// Undated tasks and tasks due outside the month are skipped. Days with no
    /// deadlines are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] when the month is out of range.
    pub fn build(tasks: &'a [Task], year: i32, month: u32) -> Result<Self, CalendarError> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(CalendarError::InvalidMonth { year, month })?;

        let mut by_day: BTreeMap<NaiveDate, Vec<&'a Task>> = BTreeMap::new();
        for task in tasks {
            let Some(due) = task.due_date() else {
                continue;
            };
            if due.year() == year && due.month() == month {
                by_day.entry(due).or_default().push(task);
            }
        }

        let days = by_day
            .into_iter()
            .map(|(date, day_tasks)| CalendarDay {
                date,
                tasks: day_tasks,
            })
            .collect();
        Ok(Self { first_day, days })
    }

    /// Returns the first day of the month.
    #[must_use]
    pub const fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Returns the days with deadlines, earliest first.
    #[must_use]
    pub fn days(&self) -> &[CalendarDay<'a>] {
        &self.days
    }

    /// Returns the tasks due on `date`.
    #[must_use]
    pub fn tasks_on(&self, date: NaiveDate) -> &[&'a Task] {
        self.days
            .iter()
            .find(|day| day.date == date)
            .map(|day| day.tasks.as_slice())
            .unwrap_or_default()
    }

    /// Returns the number of tasks due in the month.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.days.iter().map(|day| day.tasks.len()).sum()
    }
}
