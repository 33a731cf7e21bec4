//! # userdir-core
//!
//! Domain layer for the user directory: entities, value objects, the
//! credential store trait, and the store error type. This crate has zero
//! dependencies on infrastructure (file system, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{RefreshTokenRecord, User};
pub use error::StoreError;
pub use traits::{CredentialStore, StoreResult};
pub use value_objects::{Role, UserId, UserIdParseError};
