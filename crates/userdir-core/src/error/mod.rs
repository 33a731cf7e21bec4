//! Store error type
//!
//! The credential store trait lives in this crate, so its error type does
//! too; implementations map their infrastructure failures into these
//! variants.

/// Error raised by credential store implementations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying persistence failed (I/O, rename, fsync)
    #[error("store I/O error: {0}")]
    Io(String),

    /// Persisted document could not be parsed or encoded
    #[error("store serialization error: {0}")]
    Serialization(String),

    /// Write conflicts with an existing record (e.g. duplicate username)
    #[error("conflict: {0}")]
    Conflict(String),
}

impl StoreError {
    /// Create an I/O error from any displayable cause
    pub fn io(err: impl std::fmt::Display) -> Self {
        Self::Io(err.to_string())
    }

    /// Create a serialization error from any displayable cause
    pub fn serialization(err: impl std::fmt::Display) -> Self {
        Self::Serialization(err.to_string())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
