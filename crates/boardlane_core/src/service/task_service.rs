//! Task use-case service over the position ledger.
//!
//! # Responsibility
//! - Run aggregated payload validation above the repository layer.
//! - Provide create, delete, swap, move, and relocate entry points.
//!
//! # Invariants
//! - Every validation finding for one call is reported in one error.
//! - Swaps are raw position exchanges by default; the `strict_swaps`
//!   configuration rejects cross-board pairs before touching the store.

use crate::model::board::BoardId;
use crate::model::payload::validate_task_payload;
use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{TaskRepoError, TaskRepository};
use crate::service::ErrorKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from task service operations.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Aggregated payload validation findings.
    InvalidPayload(Vec<String>),
    /// Cross-board swap rejected under strict swap policy.
    CrossBoardSwap {
        first_board: BoardId,
        second_board: BoardId,
    },
    /// Repository-level failure.
    Repo(TaskRepoError),
}

impl TaskServiceError {
    /// Classifies this error for façade response mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPayload(_) | Self::CrossBoardSwap { .. } => ErrorKind::InvalidArgument,
            Self::Repo(TaskRepoError::TaskNotFound(_) | TaskRepoError::BoardNotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Repo(
                TaskRepoError::PositionOutOfRange { .. }
                | TaskRepoError::SameBoard(_)
                | TaskRepoError::BlankTitle,
            ) => ErrorKind::InvalidArgument,
            Self::Repo(_) => ErrorKind::StoreFailure,
        }
    }
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPayload(violations) => {
                write!(f, "invalid task payload: {}", violations.join("; "))
            }
            Self::CrossBoardSwap {
                first_board,
                second_board,
            } => write!(
                f,
                "strict swap policy rejects tasks from different boards: {first_board} and {second_board}"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::InvalidPayload(_) | Self::CrossBoardSwap { .. } => None,
        }
    }
}

impl From<TaskRepoError> for TaskServiceError {
    fn from(value: TaskRepoError) -> Self {
        Self::Repo(value)
    }
}

/// Task use-case facade over the position ledger.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    strict_swaps: bool,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service with the observed swap behavior: raw position
    /// exchange, cross-board pairs permitted.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            strict_swaps: false,
        }
    }

    /// Creates a service that rejects cross-board swaps.
    pub fn with_strict_swaps(repo: R) -> Self {
        Self {
            repo,
            strict_swaps: true,
        }
    }

    /// Creates one task, appending when no explicit position is given.
    pub fn create_task(
        &self,
        title: impl Into<String>,
        position: Option<i64>,
        board_id: BoardId,
    ) -> Result<Task, TaskServiceError> {
        let title = title.into();
        let violations = validate_task_payload(&title, position, board_id);
        if !violations.is_empty() {
            return Err(TaskServiceError::InvalidPayload(violations));
        }
        self.repo
            .create_task(&title, position, board_id)
            .map_err(Into::into)
    }

    /// Deletes one task; its board's survivors renumber to close the gap.
    pub fn delete_task(&self, task_id: TaskId) -> Result<(), TaskServiceError> {
        self.repo.delete_task(task_id).map_err(Into::into)
    }

    /// Exchanges the stored positions of two tasks.
    pub fn swap_positions(
        &self,
        first_id: TaskId,
        second_id: TaskId,
    ) -> Result<(), TaskServiceError> {
        if self.strict_swaps {
            let first = self
                .repo
                .get_task(first_id)?
                .ok_or(TaskServiceError::Repo(TaskRepoError::TaskNotFound(
                    first_id,
                )))?;
            let second = self
                .repo
                .get_task(second_id)?
                .ok_or(TaskServiceError::Repo(TaskRepoError::TaskNotFound(
                    second_id,
                )))?;
            if first.board_id != second.board_id {
                return Err(TaskServiceError::CrossBoardSwap {
                    first_board: first.board_id,
                    second_board: second.board_id,
                });
            }
        }
        self.repo
            .swap_positions(first_id, second_id)
            .map_err(Into::into)
    }

    /// Moves one task to an explicit position within its board.
    pub fn move_task(&self, task_id: TaskId, new_position: i64) -> Result<(), TaskServiceError> {
        if new_position < 0 {
            return Err(TaskServiceError::InvalidPayload(vec![format!(
                "newPosition must be a non-negative integer, got {new_position}"
            )]));
        }
        self.repo
            .move_within_board(task_id, new_position)
            .map_err(Into::into)
    }

    /// Moves one task into another board, appending when no explicit target
    /// position is given.
    pub fn relocate_task(
        &self,
        task_id: TaskId,
        target_board_id: BoardId,
        target_position: Option<i64>,
    ) -> Result<Task, TaskServiceError> {
        let mut violations = Vec::new();
        if target_board_id <= 0 {
            violations.push(format!(
                "targetBoardId must be a positive integer, got {target_board_id}"
            ));
        }
        if let Some(position) = target_position {
            if position < 0 {
                violations.push(format!(
                    "targetPosition must be a non-negative integer, got {position}"
                ));
            }
        }
        if !violations.is_empty() {
            return Err(TaskServiceError::InvalidPayload(violations));
        }
        self.repo
            .relocate_to_board(task_id, target_board_id, target_position)
            .map_err(Into::into)
    }

    /// Loads one task by id.
    pub fn get_task(&self, task_id: TaskId) -> Result<Option<Task>, TaskServiceError> {
        self.repo.get_task(task_id).map_err(Into::into)
    }

    /// Lists one board's tasks in display order.
    pub fn list_board_tasks(&self, board_id: BoardId) -> Result<Vec<Task>, TaskServiceError> {
        self.repo.list_board_tasks(board_id).map_err(Into::into)
    }

    /// Renames one task.
    pub fn rename_task(
        &self,
        task_id: TaskId,
        title: impl Into<String>,
    ) -> Result<(), TaskServiceError> {
        self.repo
            .rename_task(task_id, &title.into())
            .map_err(Into::into)
    }
}
