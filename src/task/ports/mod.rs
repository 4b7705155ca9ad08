//! Port contracts for task management.
//!
//! Ports define infrastructure-agnostic interfaces used by services and view
//! controllers.

pub mod store;

pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
