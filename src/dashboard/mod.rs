//! Dashboard counters and activity.

mod service;
mod stats;

pub use service::{DEFAULT_ACTIVITY_LIMIT, Dashboard, DashboardService, DashboardSnapshot};
pub use stats::{PriorityBreakdown, TaskStats, compute_stats};

#[cfg(test)]
mod tests;
