//! # userdir-common
//!
//! Shared utilities: configuration, error taxonomy, the token codec
//! (JWT access tokens plus opaque refresh secrets), password hashing,
//! and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    fingerprint, generate_refresh_secret, hash_password, verify_password, Claims, JwtService,
};
pub use config::{AppConfig, AppSettings, ConfigError, CorsConfig, JwtConfig, ServerConfig, StoreConfig};
pub use error::{AppError, AppResult, ErrorBody};
pub use telemetry::{try_init_tracing, TracingError};
