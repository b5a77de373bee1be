use axum::{
    Extension, Json,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use std::sync::Arc;

use super::observability;
use super::validation::validate_required;
use super::{ApiError, ApiResponse, AppState, ChangePlanRequest, LoginRequest, SessionResponse};
use crate::models::User;
use crate::plans::PlanTier;
use crate::services::{AuthSession, SignupRequest};

/// The authenticated caller, inserted into request extensions by
/// [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            user: session.user,
        }
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Requires an `Authorization: Bearer <token>` header issued by login or
/// signup.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    let user = state.auth_service().authenticate(&token).await?;
    observability::record_user_id(&request, &user.id);

    request.extensions_mut().insert(CurrentUser { user, token });
    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get("Authorization")?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let email = validate_required(&payload.email, "Email")?;
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let session = state.auth_service().login(email, &payload.password).await?;
    Ok(Json(ApiResponse::success(session.into())))
}

/// POST /auth/signup
/// New accounts start on the Free plan.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let session = state.auth_service().signup(payload).await?;
    Ok(Json(ApiResponse::success(session.into())))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.auth_service().logout(&current.token).await?;
    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Logged out".to_string(),
    })))
}

/// GET /auth/me
pub async fn get_current_user(
    Extension(current): Extension<CurrentUser>,
) -> Json<ApiResponse<User>> {
    Json(ApiResponse::success(current.user))
}

/// PUT /auth/plan
pub async fn change_plan(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<ChangePlanRequest>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let plan: PlanTier = payload.plan.parse()?;
    let user = state
        .auth_service()
        .change_plan(&current.user.id, plan)
        .await?;
    Ok(Json(ApiResponse::success(user)))
}
