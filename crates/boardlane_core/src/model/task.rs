//! Task domain model.
//!
//! # Responsibility
//! - Define the ordered entry owned by exactly one board.
//!
//! # Invariants
//! - `id` is store-assigned and never reused for another task.
//! - `position` is zero-based and dense within `board_id`: at rest, the
//!   positions of one board's tasks are exactly `{0..n-1}`.
//! - Positions carry no meaning across boards.

use crate::model::board::BoardId;
use serde::{Deserialize, Serialize};

/// Stable store-assigned task identifier.
pub type TaskId = i64;

/// Ordered entry belonging to exactly one board.
///
/// The task repository is the only writer of `position`; every mutation
/// keeps the owning board's positions dense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned positive identifier.
    pub id: TaskId,
    /// Trimmed, non-blank display title.
    pub title: String,
    /// Zero-based order key within the owning board.
    pub position: i64,
    /// Owning board reference.
    pub board_id: BoardId,
    /// Unix epoch milliseconds, set by the store on insert.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed by the store on update.
    pub updated_at: i64,
}
