//! Error types for hexed-buffer.

use thiserror::Error;

/// Errors that can occur during buffer persistence.
///
/// Edits never fail; only file access does.
#[derive(Error, Debug)]
pub enum BufferError {
    /// Reading or writing the bound file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `save()` was called on a buffer with no file path.
    #[error("no file path bound to buffer")]
    NoPath,
}

/// Result type alias for buffer operations.
pub type Result<T> = std::result::Result<T, BufferError>;
