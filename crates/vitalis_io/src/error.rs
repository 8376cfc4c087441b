//! Error types for vitalis_io.
//!
//! Provides structured error handling for tape persistence: frame
//! packing, file I/O, and serialization.

use thiserror::Error;

/// Main error type for vitalis_io operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Frame shape mismatch against the grid
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Corrupt or truncated tape data
    #[error("Corrupt tape: {0}")]
    Corrupt(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<IoError>,
    },
}

/// Result type alias for vitalis_io operations.
pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    /// Creates a new dimension-mismatch error.
    #[must_use]
    pub fn dimension_mismatch<S: Into<String>>(msg: S) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    /// Creates a new corrupt-tape error.
    #[must_use]
    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        Self::Corrupt(msg.into())
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}
