//! Domain model for task management.
//!
//! Tasks move freely between the `todo`, `in_progress` and `completed`
//! statuses. Every mutation is mirrored by an append-only activity entry,
//! and infrastructure concerns stay outside of the domain boundary.

mod activity;
mod error;
mod hours;
mod ids;
mod task;
mod user;

pub use activity::{ActivityAction, ActivityLogEntry, NewActivity};
pub use error::{
    ParseActivityActionError, ParseTaskPriorityError, ParseTaskStatusError, ParseUserRoleError,
    TaskDomainError,
};
pub use hours::Hours;
pub use ids::{ActivityId, TaskId, UserId};
pub use task::{PersistedTaskData, Task, TaskDetails, TaskPatch, TaskPriority, TaskStatus};
pub use user::{User, UserProfile, UserRole};
