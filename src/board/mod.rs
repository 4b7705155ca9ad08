//! Kanban board view state.
//!
//! Moves are two-phase: [`Board::apply_move`] changes the local columns
//! immediately, then [`BoardController::persist`] writes the new status to
//! the store. A failed write discards local state by reloading every column
//! from the store.

mod columns;
mod controller;

pub use columns::{Board, BoardError, Column, PendingStatusChange, TaskMove};
pub use controller::{BoardController, MoveOutcome};
