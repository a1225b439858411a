//! Pure payload validation for board and task input.
//!
//! # Responsibility
//! - Check structural validity of caller-supplied payloads before they
//!   reach the repositories.
//! - Aggregate every violation instead of stopping at the first, so one
//!   response can report all problems at once.
//!
//! # Invariants
//! - Functions here are side-effect-free and never touch the store.
//! - The trimmed title form produced by [`normalize_title`] is the form
//!   that gets persisted.

use crate::model::board::BoardId;

/// Returns the trimmed title, or `None` when it is blank after trimming.
pub fn normalize_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

/// Validates a board payload, returning every violation message.
///
/// An empty result means the payload is structurally valid.
pub fn validate_board_payload(title: &str) -> Vec<String> {
    let mut violations = Vec::new();
    if normalize_title(title).is_none() {
        violations.push("title must not be blank".to_string());
    }
    violations
}

/// Validates a task payload, returning every violation message.
///
/// `position` is the optional explicit insert position; bounds against the
/// board's current count are a repository concern, only the sign is checked
/// here.
pub fn validate_task_payload(
    title: &str,
    position: Option<i64>,
    board_id: BoardId,
) -> Vec<String> {
    let mut violations = Vec::new();
    if normalize_title(title).is_none() {
        violations.push("title must not be blank".to_string());
    }
    if let Some(position) = position {
        if position < 0 {
            violations.push(format!(
                "position must be a non-negative integer, got {position}"
            ));
        }
    }
    if board_id <= 0 {
        violations.push(format!(
            "boardId must be a positive integer, got {board_id}"
        ));
    }
    violations
}
