//! Request DTOs
//!
//! Wire format is camelCase JSON. All request DTOs implement `Deserialize`
//! and `Validate`; empty required fields are rejected before the service
//! layer sees them.

use serde::Deserialize;
use validator::Validate;

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64, message = "Username required"))]
    pub username: String,

    #[validate(length(min = 1, max = 256, message = "Password required"))]
    pub password: String,
}

/// Token refresh request (bearer-free; the refresh secret travels in the body)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token required"))]
    pub refresh_token: String,
}

/// Logout request; the refresh token is optional and logout always succeeds
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}
