//! Repository contracts and their SQLite implementations.

pub mod board_repo;
pub mod task_repo;
