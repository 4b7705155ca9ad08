//! Adapter implementations for task management ports.
//!
//! - [`memory`]: lock-protected in-process store for tests and demos
//! - [`postgres`]: Diesel-backed `PostgreSQL` store

pub mod memory;
pub mod postgres;
