//! Authentication handlers
//!
//! Endpoints for login, token refresh, logout, logout-all, and identity.

use axum::{extract::State, Json};
use axum_extra::{headers::UserAgent, TypedHeader};
use userdir_service::{
    AuthResponse, LoginRequest, LogoutRequest, MessageResponse, RefreshResponse,
    RefreshTokenRequest, SessionService, UserView,
};

use crate::extractors::{AuthUser, OptionalJson, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

fn device_info(user_agent: Option<TypedHeader<UserAgent>>) -> Option<String> {
    user_agent.map(|TypedHeader(ua)| ua.to_string())
}

/// Login with username and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    user_agent: Option<TypedHeader<UserAgent>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = SessionService::new(state.service_context());
    let response = service.login(request, device_info(user_agent)).await?;
    Ok(Json(response))
}

/// Redeem a refresh token for a rotated token pair
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    user_agent: Option<TypedHeader<UserAgent>>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let service = SessionService::new(state.service_context());
    let response = service.refresh(request, device_info(user_agent)).await?;
    Ok(Json(response))
}

/// Revoke one session; succeeds whether or not the token was known
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    OptionalJson(body): OptionalJson<LogoutRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = SessionService::new(state.service_context());
    service.logout(body.unwrap_or_default()).await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// Revoke every session belonging to the authenticated user
///
/// POST /auth/logout-all
pub async fn logout_all(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    let service = SessionService::new(state.service_context());
    let count = service.logout_all(auth.user_id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Logged out of {count} session(s)"
    ))))
}

/// Get the authenticated user's public view
///
/// GET /auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserView>> {
    let service = SessionService::new(state.service_context());
    let view = service.who_am_i(auth.user_id).await?;
    Ok(Json(view))
}
