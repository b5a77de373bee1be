//! In-memory implementation of the `VideoService` trait.
//!
//! No platform is contacted; metadata is synthesised from the URL.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::db::Store;
use crate::models::VideoInfo;
use crate::services::video_service::{VideoError, VideoService};

pub struct MemoryVideoService {
    store: Store,
}

impl MemoryVideoService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn validate_url(raw: &str) -> Result<Url, VideoError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(VideoError::MissingUrl);
    }

    let url = Url::parse(trimmed).map_err(|e| VideoError::InvalidUrl(format!("{trimmed}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(VideoError::InvalidUrl(trimmed.to_string()));
    }

    Ok(url)
}

#[async_trait]
impl VideoService for MemoryVideoService {
    async fn fetch_info(&self, url: &str) -> Result<VideoInfo, VideoError> {
        let url = validate_url(url)?;
        let info = VideoInfo::from_url(url.as_str());

        debug!(
            video_id = %info.id,
            platform = %info.platform,
            formats = info.available_formats.len(),
            best = ?info.best_quality(),
            "Resolved video info"
        );

        self.store.videos().upsert(info.clone()).await;
        Ok(info)
    }

    async fn get_info(&self, video_id: &str) -> Result<VideoInfo, VideoError> {
        self.store
            .videos()
            .get(video_id)
            .await
            .ok_or_else(|| VideoError::NotFound(video_id.to_string()))
    }
}
