//! Read-side task views: filtered lists, the personal list and the
//! deadline calendar.

pub mod calendar;
mod my_tasks;
mod query;

pub use calendar::{CalendarDay, CalendarError, CalendarMonth};
pub use my_tasks::{ListSummary, MyTasksView};
pub use query::{PriorityFilter, SortKey, StatusFilter, TaskQuery};
