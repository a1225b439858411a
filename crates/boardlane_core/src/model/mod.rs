//! Domain records and pure payload validation.

pub mod board;
pub mod payload;
pub mod task;
