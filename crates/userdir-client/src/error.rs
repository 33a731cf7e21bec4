//! Client error types

use thiserror::Error;

/// Client-side error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection refused, timeout, bad JSON)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error body
    #[error("API error {status}: {message} ({code})")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// No session is held; the operation needs a prior login
    #[error("Not logged in")]
    AuthRequired,

    /// The session could not be silently refreshed; a new login is required
    #[error("Session expired")]
    SessionExpired,
}

impl ClientError {
    /// Machine-readable error code from the server, when one was received
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
