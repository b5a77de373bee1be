//! In-memory storage behind a cloneable [`Store`] handle.
//!
//! Nothing here is persisted; every map lives for the life of the process.

pub mod repositories;

use crate::config::SecurityConfig;

pub use repositories::download::DownloadRepository;
pub use repositories::user::{UserRepository, hash_password, verify_password};
pub use repositories::video::VideoRepository;

#[derive(Clone, Default)]
pub struct Store {
    users: UserRepository,
    videos: VideoRepository,
    downloads: DownloadRepository,
}

impl Store {
    #[must_use]
    pub fn new(security: SecurityConfig) -> Self {
        Self {
            users: UserRepository::new(security),
            videos: VideoRepository::default(),
            downloads: DownloadRepository::default(),
        }
    }

    /// Replaces the video cache with one holding at most `capacity` videos.
    #[must_use]
    pub fn with_video_capacity(mut self, capacity: usize) -> Self {
        self.videos = VideoRepository::new(capacity);
        self
    }

    #[must_use]
    pub const fn users(&self) -> &UserRepository {
        &self.users
    }

    #[must_use]
    pub const fn videos(&self) -> &VideoRepository {
        &self.videos
    }

    #[must_use]
    pub const fn downloads(&self) -> &DownloadRepository {
        &self.downloads
    }
}
