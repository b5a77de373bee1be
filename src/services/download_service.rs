//! Domain service for download attempts and history.
//!
//! This is the caller of [`crate::policy::evaluate`]: it owns the user's
//! download history and the per-period count the policy needs.

use serde::Serialize;
use thiserror::Error;

use crate::models::{DownloadStatus, Platform, UserDownload};
use crate::plans::{DownloadLimit, PlanTier};
use crate::policy::{DenialReason, denial_message};
use crate::quality::VideoQuality;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("User not found")]
    UserNotFound,

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Format not found: {0}")]
    FormatNotFound(String),

    #[error("Download record not found: {0}")]
    NotFound(String),

    #[error("{}", denied_message(.tier, .reason))]
    Denied { tier: PlanTier, reason: DenialReason },

    #[error("Validation error: {0}")]
    Validation(String),
}

fn denied_message(tier: &PlanTier, reason: &DenialReason) -> String {
    denial_message(*tier, *reason)
}

/// History query. `None` filters match everything.
#[derive(Debug, Clone)]
pub struct DownloadFilter {
    pub page: usize,
    pub limit: usize,
    pub platform: Option<Platform>,
    pub status: Option<DownloadStatus>,
}

impl Default for DownloadFilter {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            platform: None,
            status: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadPage {
    pub downloads: Vec<UserDownload>,
    /// Number of records matching the filter, before pagination.
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuotaUsage {
    pub plan: PlanTier,
    pub downloads_today: u32,
    pub limit: DownloadLimit,
    /// `None` when the plan is unlimited.
    pub remaining: Option<u32>,
    pub quality_ceiling: VideoQuality,
}

#[async_trait::async_trait]
pub trait DownloadService: Send + Sync {
    /// Attempts a download of one format of a previously looked-up video.
    ///
    /// The user's plan is checked against today's completed downloads and the
    /// format's quality. On success the record is stored and returned.
    ///
    /// # Errors
    ///
    /// - [`DownloadError::UserNotFound`], [`DownloadError::VideoNotFound`] or
    ///   [`DownloadError::FormatNotFound`] if a reference does not resolve
    /// - [`DownloadError::Denied`] if the plan does not permit the download
    async fn download(
        &self,
        user_id: &str,
        video_id: &str,
        format_id: &str,
    ) -> Result<UserDownload, DownloadError>;

    /// Lists the user's history, newest first, filtered and paginated.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Validation`] for a zero page or out-of-range limit.
    async fn list(&self, user_id: &str, filter: DownloadFilter)
    -> Result<DownloadPage, DownloadError>;

    async fn delete(&self, user_id: &str, download_id: &str) -> Result<(), DownloadError>;

    async fn usage(&self, user_id: &str) -> Result<QuotaUsage, DownloadError>;
}
