//! Status columns and the local, optimistic half of a task move.

use crate::task::domain::{Task, TaskId, TaskStatus};
use serde::Serialize;
use thiserror::Error;

/// Ordered tasks sharing one status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    status: TaskStatus,
    tasks: Vec<Task>,
}

impl Column {
    const fn empty(status: TaskStatus) -> Self {
        Self {
            status,
            tasks: Vec::new(),
        }
    }

    /// Returns the status this column groups.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the column title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.status.label()
    }

    /// Returns the tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the column holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn position_of(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == task_id)
    }
}

/// A user-initiated move of one task between (or within) columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskMove {
    /// Task being moved.
    pub task_id: TaskId,
    /// Column the task is dragged from.
    pub source: TaskStatus,
    /// Position of the task in the source column.
    pub source_index: usize,
    /// Column the task is dropped into.
    pub destination: TaskStatus,
    /// Drop position in the destination column.
    pub destination_index: usize,
}

impl TaskMove {
    /// Returns whether the move drops the task where it already is.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.source == self.destination && self.source_index == self.destination_index
    }
}

/// Status change applied locally that still has to be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingStatusChange {
    /// Task that moved.
    pub task_id: TaskId,
    /// Status the task now carries locally.
    pub status: TaskStatus,
}

/// Errors raised by board moves.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    /// The task is not at the claimed position of the source column.
    #[error("task {task_id} is not at index {index} of the {status} column")]
    TaskNotAtPosition {
        /// Task the move referred to.
        task_id: TaskId,
        /// Claimed source column.
        status: TaskStatus,
        /// Claimed source index.
        index: usize,
    },

    /// The task is not on the board.
    #[error("task {0} is not on the board")]
    UnknownTask(TaskId),
}

/// Tasks grouped into one column per status.
///
/// A task's status alone decides its column, so every known task appears in
/// exactly one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    columns: [Column; 3],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            columns: TaskStatus::ALL.map(Column::empty),
        }
    }
}

impl Board {
    /// Groups `tasks` by status, keeping their relative order.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut board = Self::default();
        for task in tasks {
            board.column_mut(task.status()).tasks.push(task);
        }
        board
    }

    /// Returns the columns in workflow order.
    #[must_use]
    pub const fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column for `status`.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &Column {
        match status {
            TaskStatus::Todo => &self.columns[0],
            TaskStatus::InProgress => &self.columns[1],
            TaskStatus::Completed => &self.columns[2],
        }
    }

    fn column_mut(&mut self, status: TaskStatus) -> &mut Column {
        match status {
            TaskStatus::Todo => &mut self.columns[0],
            TaskStatus::InProgress => &mut self.columns[1],
            TaskStatus::Completed => &mut self.columns[2],
        }
    }

    /// Returns the total number of tasks on the board.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Finds a task and its position.
    #[must_use]
    pub fn locate(&self, task_id: TaskId) -> Option<(TaskStatus, usize)> {
        self.columns.iter().find_map(|column| {
            column
                .position_of(task_id)
                .map(|index| (column.status, index))
        })
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        let (status, index) = self.locate(task_id)?;
        self.column(status).tasks.get(index)
    }

    /// Applies a move locally.
    ///
    /// The task leaves the source column, takes the destination status and
    /// is inserted at the destination index, clamped to the column length.
    /// Returns `None` when the drop, after clamping, lands on the original
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotAtPosition`] when the task is not at the
    /// claimed source position; the board is left untouched.
    pub fn apply_move(
        &mut self,
        task_move: &TaskMove,
    ) -> Result<Option<PendingStatusChange>, BoardError> {
        if task_move.is_noop() {
            return Ok(None);
        }

        let source = self.column_mut(task_move.source);
        let is_at_position = source
            .tasks
            .get(task_move.source_index)
            .is_some_and(|task| task.id() == task_move.task_id);
        if !is_at_position {
            return Err(BoardError::TaskNotAtPosition {
                task_id: task_move.task_id,
                status: task_move.source,
                index: task_move.source_index,
            });
        }
        if task_move.source == task_move.destination {
            let last = source.tasks.len().saturating_sub(1);
            if task_move.destination_index.min(last) == task_move.source_index {
                return Ok(None);
            }
        }

        let mut task = source.tasks.remove(task_move.source_index);
        task.set_status(task_move.destination);

        let destination = self.column_mut(task_move.destination);
        let index = task_move.destination_index.min(destination.tasks.len());
        destination.tasks.insert(index, task);

        Ok(Some(PendingStatusChange {
            task_id: task_move.task_id,
            status: task_move.destination,
        }))
    }

    /// Builds the move that sends `task_id` to the end of `status`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the task is not on the board.
    pub fn move_to_end(&self, task_id: TaskId, status: TaskStatus) -> Result<TaskMove, BoardError> {
        let (source, source_index) = self
            .locate(task_id)
            .ok_or(BoardError::UnknownTask(task_id))?;
        let destination_index = if source == status {
            self.column(status).len().saturating_sub(1)
        } else {
            self.column(status).len()
        };
        Ok(TaskMove {
            task_id,
            source,
            source_index,
            destination: status,
            destination_index,
        })
    }

    /// Replaces the local copy of a task with an authoritative one.
    ///
    /// The task keeps its position when its status is unchanged and is
    /// appended to its status column otherwise. Unknown tasks are appended.
    pub fn replace_task(&mut self, task: Task) {
        match self.locate(task.id()) {
            Some((status, index)) if status == task.status() => {
                if let Some(slot) = self.column_mut(status).tasks.get_mut(index) {
                    *slot = task;
                }
            }
            Some((status, index)) => {
                self.column_mut(status).tasks.remove(index);
                self.column_mut(task.status()).tasks.push(task);
            }
            None => self.column_mut(task.status()).tasks.push(task),
        }
    }
}
