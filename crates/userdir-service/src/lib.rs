//! # userdir-service
//!
//! Session manager for the user directory: login, refresh-token rotation,
//! logout, logout-all, and identity lookup, built on the credential store
//! and token codec.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    AuthResponse, LoginRequest, LogoutRequest, MessageResponse, RefreshResponse,
    RefreshTokenRequest, UserView,
};
pub use services::{ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, SessionService};
