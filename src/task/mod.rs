//! Task management for the board, personal list and dashboard views.
//!
//! Tasks carry a workflow status (`todo`, `in_progress`, `completed`) and a
//! priority, and every mutation leaves an activity entry behind. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
