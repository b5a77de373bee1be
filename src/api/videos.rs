use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, VideoInfoRequest};
use crate::models::VideoInfo;

/// POST /videos/info
/// Resolves a pasted URL to video metadata and its downloadable formats.
pub async fn fetch_video_info(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<VideoInfoRequest>,
) -> Result<Json<ApiResponse<VideoInfo>>, ApiError> {
    let info = state.video_service().fetch_info(&payload.url).await?;
    Ok(Json(ApiResponse::success(info)))
}

/// GET /videos/{id}
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VideoInfo>>, ApiError> {
    let info = state.video_service().get_info(&id).await?;
    Ok(Json(ApiResponse::success(info)))
}
