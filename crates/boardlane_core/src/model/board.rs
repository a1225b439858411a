//! Board domain model.
//!
//! # Responsibility
//! - Define the named grouping that owns an ordered set of tasks.
//!
//! # Invariants
//! - `id` is store-assigned and never reused for another board.
//! - `title` is stored in trimmed, non-blank form.

use serde::{Deserialize, Serialize};

/// Stable store-assigned board identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type BoardId = i64;

/// Named grouping that owns an ordered set of tasks.
///
/// No ordering among boards is defined; listing order is by `id` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Store-assigned positive identifier.
    pub id: BoardId,
    /// Trimmed, non-blank display title.
    pub title: String,
    /// Unix epoch milliseconds, set by the store on insert.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed by the store on update.
    pub updated_at: i64,
}
