use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::{parse_platform_filter, parse_status_filter, validate_required};
use super::{ApiError, ApiResponse, AppState, CreateDownloadRequest, DownloadListQuery};
use crate::models::UserDownload;
use crate::services::{DownloadFilter, DownloadPage, QuotaUsage};

/// POST /downloads
/// Runs the plan check and records the download. A denial is a 403 whose
/// `code` names the reason.
pub async fn create_download(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<CreateDownloadRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDownload>>), ApiError> {
    let video_id = validate_required(&payload.video_id, "Video ID")?;
    let format_id = validate_required(&payload.format_id, "Format ID")?;

    let record = state
        .download_service()
        .download(&current.user.id, video_id, format_id)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(record))))
}

/// GET /downloads?page=&limit=&platform=&status=
pub async fn list_downloads(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(params): Query<DownloadListQuery>,
) -> Result<Json<ApiResponse<DownloadPage>>, ApiError> {
    let defaults = DownloadFilter::default();
    let filter = DownloadFilter {
        page: params.page.unwrap_or(defaults.page),
        limit: params.limit.unwrap_or(defaults.limit),
        platform: parse_platform_filter(params.platform.as_deref())?,
        status: parse_status_filter(params.status.as_deref())?,
    };

    let page = state
        .download_service()
        .list(&current.user.id, filter)
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

/// DELETE /downloads/{id}
pub async fn delete_download(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .download_service()
        .delete(&current.user.id, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /downloads/usage
pub async fn get_usage(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<QuotaUsage>>, ApiError> {
    let usage = state.download_service().usage(&current.user.id).await?;
    Ok(Json(ApiResponse::success(usage)))
}
