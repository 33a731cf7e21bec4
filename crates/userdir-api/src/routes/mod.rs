//! Route definitions
//!
//! All routes are mounted at the root (no version prefix).

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, health, users};
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(health_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/logout-all", post(auth::logout_all))
        .route("/auth/me", get(auth::me))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(users::list_users))
}

/// Health check routes
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}
