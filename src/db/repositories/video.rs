use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::VideoInfo;

pub const DEFAULT_VIDEO_CAPACITY: usize = 1000;

/// Looked-up video metadata, keyed by video id.
///
/// Holds at most `capacity` videos. When full, the least recently inserted
/// video is evicted; looking a video up again refreshes its position.
#[derive(Clone)]
pub struct VideoRepository {
    inner: Arc<RwLock<Inner>>,
    capacity: usize,
}

#[derive(Default)]
struct Inner {
    videos: HashMap<String, VideoInfo>,
    order: VecDeque<String>,
}

impl Default for VideoRepository {
    fn default() -> Self {
        Self::new(DEFAULT_VIDEO_CAPACITY)
    }
}

impl VideoRepository {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            capacity: capacity.max(1),
        }
    }

    pub async fn upsert(&self, info: VideoInfo) {
        let mut inner = self.inner.write().await;

        if inner.videos.contains_key(&info.id) {
            inner.order.retain(|id| id != &info.id);
        }
        inner.order.push_back(info.id.clone());
        inner.videos.insert(info.id.clone(), info);

        while inner.videos.len() > self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.videos.remove(&oldest);
            tracing::trace!(video_id = %oldest, "Evicted cached video");
        }
    }

    pub async fn get(&self, id: &str) -> Option<VideoInfo> {
        self.inner.read().await.videos.get(id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.videos.len()
    }
}
