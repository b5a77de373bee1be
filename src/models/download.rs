use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{VideoFormat, VideoInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    Completed,
    Failed,
}

impl DownloadStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for DownloadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown download status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDownload {
    pub id: String,

    pub user_id: String,

    pub video: VideoInfo,

    pub format: VideoFormat,

    pub download_date: DateTime<Utc>,

    pub status: DownloadStatus,
}

impl UserDownload {
    #[must_use]
    pub fn completed(user_id: &str, video: VideoInfo, format: VideoFormat) -> Self {
        Self {
            id: format!("dl-{}", uuid::Uuid::new_v4()),
            user_id: user_id.to_string(),
            video,
            format,
            download_date: Utc::now(),
            status: DownloadStatus::Completed,
        }
    }

    /// Whether this record uses up quota in the period starting at `since`.
    #[must_use]
    pub fn counts_toward_quota(&self, since: DateTime<Utc>) -> bool {
        self.status == DownloadStatus::Completed && self.download_date >= since
    }
}
