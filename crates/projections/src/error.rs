//! Projection error types.

use thiserror::Error;

/// Errors that can occur while updating a read model.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing store of the read model rejected the write.
    #[error("Projection write failed: {0}")]
    Write(String),
}

/// Result type for projection operations.
pub type Result<T> = std::result::Result<T, ProjectionError>;
