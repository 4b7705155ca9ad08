//! Board controller: optimistic moves reconciled against the task store.

use super::{Board, BoardError, PendingStatusChange, TaskMove};
use crate::task::{
    domain::{Task, TaskId, TaskStatus, UserId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of a board move.
#[derive(Debug, Clone)]
pub enum MoveOutcome {
    /// The task was dropped on its own position; nothing happened.
    Unchanged,
    /// The store accepted the new status; the board holds its copy.
    Committed(Task),
    /// The store rejected the change and the board was rebuilt from a fresh
    /// listing.
    Reconciled {
        /// Failure of the status update.
        cause: TaskStoreError,
    },
    /// The store rejected the change and the fresh listing failed too; the
    /// board still shows the optimistic state.
    ReconcileFailed {
        /// Failure of the status update.
        cause: TaskStoreError,
        /// Failure of the re-fetch.
        refetch: TaskStoreError,
    },
}

impl MoveOutcome {
    /// Returns whether the store confirmed the move.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// Kanban board state owned by one user session.
pub struct BoardController<S>
where
    S: TaskStore,
{
    store: Arc<S>,
    acting_user: UserId,
    board: Board,
}

impl<S> BoardController<S>
where
    S: TaskStore,
{
    /// Creates a controller with an empty board.
    #[must_use]
    pub fn new(store: Arc<S>, acting_user: UserId) -> Self {
        Self {
            store,
            acting_user,
            board: Board::default(),
        }
    }

    /// Creates a controller and loads the board.
    ///
    /// A failed load is logged and leaves the board empty.
    pub async fn load(store: Arc<S>, acting_user: UserId) -> Self {
        let mut controller = Self::new(store, acting_user);
        if let Err(err) = controller.refresh().await {
            warn!(error = %err, "initial board load failed");
        }
        controller
    }

    /// Returns the current board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the user that moves are attributed to.
    #[must_use]
    pub const fn acting_user(&self) -> UserId {
        self.acting_user
    }

    /// Rebuilds every column from a fresh listing.
    ///
    /// # Errors
    ///
    /// Returns the store failure; the board is left as it was.
    pub async fn refresh(&mut self) -> TaskStoreResult<()> {
        match self.store.list_tasks().await {
            Ok(tasks) => {
                self.board = Board::from_tasks(tasks);
                debug!(tasks = self.board.task_count(), "board refreshed");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch tasks; keeping current board");
                Err(err)
            }
        }
    }

    /// Moves a task and persists its new status.
    ///
    /// The board changes before the store is called. When the store fails
    /// the board is rebuilt from a fresh listing rather than rolled back.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when the move does not match the board; no
    /// store call is made in that case.
    pub async fn move_task(&mut self, task_move: TaskMove) -> Result<MoveOutcome, BoardError> {
        let Some(pending) = self.board.apply_move(&task_move)? else {
            return Ok(MoveOutcome::Unchanged);
        };
        Ok(self.persist(pending).await)
    }

    /// Moves a task to the end of the `status` column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the task is not on the board.
    pub async fn change_status(
        &mut self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> Result<MoveOutcome, BoardError> {
        let task_move = self.board.move_to_end(task_id, status)?;
        self.move_task(task_move).await
    }

    /// Persists a change already applied to the board.
    pub async fn persist(&mut self, pending: PendingStatusChange) -> MoveOutcome {
        let result = self
            .store
            .update_task_status(pending.task_id, pending.status, self.acting_user)
            .await;

        match result {
            Ok(task) => {
                debug!(task_id = %task.id(), status = %task.status(), "status change committed");
                self.board.replace_task(task.clone());
                MoveOutcome::Committed(task)
            }
            Err(cause) => {
                warn!(
                    task_id = %pending.task_id,
                    status = %pending.status,
                    error = %cause,
                    "status change failed; reloading board"
                );
                match self.refresh().await {
                    Ok(()) => MoveOutcome::Reconciled { cause },
                    Err(refetch) => MoveOutcome::ReconcileFailed { cause, refetch },
                }
            }
        }
    }
}
