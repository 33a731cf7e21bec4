//! Request extractors

mod auth;
mod validated;

pub use auth::{AuthUser, RequireAdmin};
pub use validated::{OptionalJson, ValidatedJson};
