//! Core domain logic for boardlane.
//! This crate is the single source of truth for position invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::board::{Board, BoardId};
pub use model::payload::{normalize_title, validate_board_payload, validate_task_payload};
pub use model::task::{Task, TaskId};
pub use repo::board_repo::{
    BoardRepoError, BoardRepoResult, BoardRepository, SqliteBoardRepository,
};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepoError, TaskRepoResult, TaskRepository};
pub use service::board_service::{BoardService, BoardServiceError};
pub use service::task_service::{TaskService, TaskServiceError};
pub use service::ErrorKind;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
