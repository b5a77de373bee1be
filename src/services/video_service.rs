//! Domain service for video metadata lookup.

use thiserror::Error;

use crate::models::VideoInfo;

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Invalid video URL: {0}")]
    InvalidUrl(String),

    #[error("Video not found: {0}")]
    NotFound(String),
}

#[async_trait::async_trait]
pub trait VideoService: Send + Sync {
    /// Resolves metadata for a URL and caches it for later downloads.
    ///
    /// # Errors
    ///
    /// - [`VideoError::MissingUrl`] for an empty URL
    /// - [`VideoError::InvalidUrl`] if it is not an absolute http(s) URL
    async fn fetch_info(&self, url: &str) -> Result<VideoInfo, VideoError>;

    /// Returns previously fetched metadata.
    async fn get_info(&self, video_id: &str) -> Result<VideoInfo, VideoError>;
}
