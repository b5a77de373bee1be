use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, UserListQuery};
use crate::models::User;
use crate::services::{AdminStats, UserPage};

/// GET /admin/stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<AdminStats>>, ApiError> {
    Ok(Json(ApiResponse::success(state.admin_service().stats().await)))
}

/// GET /admin/users?page=&limit=
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserListQuery>,
) -> Result<Json<ApiResponse<UserPage>>, ApiError> {
    let page = state
        .admin_service()
        .list_users(params.page, params.limit)
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

/// GET /admin/users/{id}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.admin_service().get_user(&id).await?;
    Ok(Json(ApiResponse::success(user)))
}
