pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, AuthSession, SignupRequest};
pub use auth_service_impl::MemoryAuthService;

pub mod video_service;
pub mod video_service_impl;
pub use video_service::{VideoError, VideoService};
pub use video_service_impl::MemoryVideoService;

pub mod download_service;
pub mod download_service_impl;
pub use download_service::{
    DownloadError, DownloadFilter, DownloadPage, DownloadService, QuotaUsage,
};
pub use download_service_impl::{MemoryDownloadService, quota_period_start};

pub mod admin_service;
pub mod admin_service_impl;
pub use admin_service::{AdminError, AdminService, AdminStats, DailyCount, UserPage};
pub use admin_service_impl::MemoryAdminService;
