//! Data transfer objects for the auth API

mod mappers;
mod requests;
mod responses;

pub use requests::{LoginRequest, LogoutRequest, RefreshTokenRequest};
pub use responses::{AuthResponse, MessageResponse, RefreshResponse, UserView};
