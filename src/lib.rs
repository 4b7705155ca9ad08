//! Taskboard: task tracking core for a team kanban board.
//!
//! The crate holds the task model, the persistence port with in-memory and
//! `PostgreSQL` adapters, and the session-scoped views built on top of them.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`task`]: Task model, store port, adapters and lifecycle service
//! - [`board`]: Kanban columns with optimistic status moves
//! - [`dashboard`]: Counters and recent activity
//! - [`views`]: Filtered lists, the personal list and the calendar
//! - [`config`]: Environment configuration

pub mod board;
pub mod config;
pub mod dashboard;
pub mod task;
pub mod views;

#[cfg(test)]
mod test_support;
