//! Error types for stream generation.
//!
//! Generation itself is infallible; the only failure surface is the
//! configuration boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("time span must cover at least one day, got {0}")]
    EmptyTimeSpan(u32),
}

/// Result type for stream operations
pub type Result<T> = std::result::Result<T, StreamError>;
