//! Authentication extractors
//!
//! `AuthUser` verifies the bearer access token and exposes its claims to the
//! handler. `RequireAdmin` layers the role check on top. An absent header is
//! 401 `MISSING_TOKEN`; an expired token is 401 `TOKEN_EXPIRED` (the one case
//! clients retry after a refresh); any other verification failure is 403.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use userdir_common::AppError;
use userdir_core::{Role, UserId};

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from the access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::App(AppError::MissingToken))?;

        let app_state = AppState::from_ref(state);

        let claims = app_state
            .jwt_service()
            .verify_access_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Access token rejected");
                ApiError::App(e)
            })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!("Access token carried a malformed subject");
            ApiError::App(e)
        })?;

        Ok(AuthUser {
            user_id,
            username: claims.username,
            role: claims.role,
        })
    }
}

/// Authenticated user that must hold the admin role
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if !user.role.is_admin() {
            tracing::warn!(user_id = %user.user_id, "Admin route denied");
            return Err(ApiError::App(AppError::AdminRequired));
        }

        Ok(RequireAdmin(user))
    }
}
