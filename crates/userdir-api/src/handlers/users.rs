//! User directory handlers

use axum::{extract::State, Json};
use userdir_service::UserView;

use crate::extractors::RequireAdmin;
use crate::response::ApiResult;
use crate::state::AppState;

/// List all users as public views (admin only)
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> ApiResult<Json<Vec<UserView>>> {
    let users = state.service_context().store().list_users().await?;
    let views: Vec<UserView> = users.iter().map(UserView::from).collect();
    Ok(Json(views))
}
