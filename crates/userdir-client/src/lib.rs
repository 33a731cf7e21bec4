//! # userdir-client
//!
//! Client-side session agent for the user directory API. Holds the current
//! token pair in memory, attaches the access token to every request, and
//! performs at most one silent refresh-and-retry per call when the server
//! answers 401 `TOKEN_EXPIRED`. Any other authentication failure clears the
//! local session and surfaces [`ClientError::SessionExpired`], leaving the
//! re-login decision to the caller.

mod agent;
mod error;

pub use agent::SessionAgent;
pub use error::{ClientError, ClientResult};

pub use userdir_service::{AuthResponse, RefreshResponse, UserView};
