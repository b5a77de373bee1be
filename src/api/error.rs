use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::policy::{DenialReason, PolicyError};
use crate::services::{AdminError, AuthError, DownloadError, VideoError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ValidationError(String),

    Conflict(String),

    InternalError(String),

    Unauthorized(String),

    /// The plan does not allow the request.
    Forbidden { reason: DenialReason, message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            Self::Forbidden { reason, message } => write!(f, "Forbidden ({reason}): {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, ApiResponse::<()>::error(msg)),
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, ApiResponse::error(msg)),
            Self::Conflict(msg) => (StatusCode::CONFLICT, ApiResponse::error(msg)),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("An internal error occurred"),
                )
            }
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ApiResponse::error(msg)),
            Self::Forbidden { reason, message } => (
                StatusCode::FORBIDDEN,
                ApiResponse::error(message).with_code(reason.as_str()),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::Unauthorized => {
                Self::Unauthorized(err.to_string())
            }
            AuthError::UserNotFound => Self::NotFound(err.to_string()),
            AuthError::EmailTaken => Self::Conflict(err.to_string()),
            AuthError::Validation(msg) => Self::ValidationError(msg),
            AuthError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<VideoError> for ApiError {
    fn from(err: VideoError) -> Self {
        match err {
            VideoError::MissingUrl | VideoError::InvalidUrl(_) => {
                Self::ValidationError(err.to_string())
            }
            VideoError::NotFound(_) => Self::NotFound(err.to_string()),
        }
    }
}

impl From<DownloadError> for ApiError {
    fn from(err: DownloadError) -> Self {
        match err {
            DownloadError::Denied { reason, .. } => Self::Forbidden {
                reason,
                message: err.to_string(),
            },
            DownloadError::UserNotFound
            | DownloadError::VideoNotFound(_)
            | DownloadError::FormatNotFound(_)
            | DownloadError::NotFound(_) => Self::NotFound(err.to_string()),
            DownloadError::Validation(msg) => Self::ValidationError(msg),
        }
    }
}

impl From<AdminError> for ApiError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::UserNotFound(_) => Self::NotFound(err.to_string()),
            AdminError::Validation(msg) => Self::ValidationError(msg),
        }
    }
}

impl From<PolicyError> for ApiError {
    fn from(err: PolicyError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plans::PlanTier;

    #[test]
    fn test_denied_maps_to_forbidden() {
        let err: ApiError = DownloadError::Denied {
            tier: PlanTier::Free,
            reason: DenialReason::QuotaExceeded,
        }
        .into();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_auth_error_status() {
        let cases = [
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::EmailTaken, StatusCode::CONFLICT),
            (
                AuthError::Validation("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AuthError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_admin_error_status() {
        let missing = ApiError::from(AdminError::UserNotFound("u1".to_string()));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let invalid = ApiError::from(AdminError::Validation("bad page".to_string()));
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_policy_error_is_validation() {
        let err: ApiError = PolicyError::UnknownTier("Gold".to_string()).into();
        assert!(matches!(err, ApiError::ValidationError(ref m) if m.contains("Gold")));
    }
}
