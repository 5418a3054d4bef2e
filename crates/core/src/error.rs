//! Error types for postab table extraction.

use thiserror::Error;

/// Primary error type for positional table extraction.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("malformed word #{index}: {reason}")]
    MalformedWord { index: usize, reason: String },

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("thread pool error: {0}")]
    ThreadPool(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type alias for TableError.
pub type Result<T> = std::result::Result<T, TableError>;
