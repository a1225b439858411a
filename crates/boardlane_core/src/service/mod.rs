//! Use-case services layered above the repositories.

pub mod board_service;
pub mod task_service;

/// Coarse classification of service errors for façade response mapping.
///
/// Core stays transport-agnostic; an HTTP façade maps these to 400/404/500.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Client-fixable input error.
    InvalidArgument,
    /// Referenced id does not exist.
    NotFound,
    /// Underlying persistence failure.
    StoreFailure,
}
