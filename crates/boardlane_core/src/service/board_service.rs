//! Board use-case service.
//!
//! # Responsibility
//! - Validate board payloads above the repository layer.
//! - Provide board create, list, rename, and cascade-delete operations.
//!
//! # Invariants
//! - Validation findings are aggregated before any repository call.
//! - Service APIs never bypass repository persistence contracts.

use crate::model::board::{Board, BoardId};
use crate::model::payload::validate_board_payload;
use crate::repo::board_repo::{BoardRepoError, BoardRepository};
use crate::service::ErrorKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from board service operations.
#[derive(Debug)]
pub enum BoardServiceError {
    /// Aggregated payload validation findings.
    InvalidPayload(Vec<String>),
    /// Repository-level failure.
    Repo(BoardRepoError),
}

impl BoardServiceError {
    /// Classifies this error for façade response mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPayload(_) => ErrorKind::InvalidArgument,
            Self::Repo(BoardRepoError::BoardNotFound(_)) => ErrorKind::NotFound,
            Self::Repo(BoardRepoError::BlankTitle) => ErrorKind::InvalidArgument,
            Self::Repo(BoardRepoError::Db(_) | BoardRepoError::InvalidData(_)) => {
                ErrorKind::StoreFailure
            }
        }
    }
}

impl Display for BoardServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPayload(violations) => {
                write!(f, "invalid board payload: {}", violations.join("; "))
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::InvalidPayload(_) => None,
        }
    }
}

impl From<BoardRepoError> for BoardServiceError {
    fn from(value: BoardRepoError) -> Self {
        Self::Repo(value)
    }
}

/// Board use-case facade.
pub struct BoardService<R: BoardRepository> {
    repo: R,
}

impl<R: BoardRepository> BoardService<R> {
    /// Creates a service from a repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one board.
    pub fn create_board(&self, title: impl Into<String>) -> Result<Board, BoardServiceError> {
        let title = title.into();
        let violations = validate_board_payload(&title);
        if !violations.is_empty() {
            return Err(BoardServiceError::InvalidPayload(violations));
        }
        self.repo.create_board(&title).map_err(Into::into)
    }

    /// Loads one board by id.
    pub fn get_board(&self, board_id: BoardId) -> Result<Option<Board>, BoardServiceError> {
        self.repo.get_board(board_id).map_err(Into::into)
    }

    /// Lists all boards.
    pub fn list_boards(&self) -> Result<Vec<Board>, BoardServiceError> {
        self.repo.list_boards().map_err(Into::into)
    }

    /// Renames one board.
    pub fn rename_board(
        &self,
        board_id: BoardId,
        title: impl Into<String>,
    ) -> Result<(), BoardServiceError> {
        let title = title.into();
        let violations = validate_board_payload(&title);
        if !violations.is_empty() {
            return Err(BoardServiceError::InvalidPayload(violations));
        }
        self.repo.rename_board(board_id, &title).map_err(Into::into)
    }

    /// Deletes one board and every task it owns.
    pub fn delete_board(&self, board_id: BoardId) -> Result<(), BoardServiceError> {
        self.repo.delete_board(board_id).map_err(Into::into)
    }
}
