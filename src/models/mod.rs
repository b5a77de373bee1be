pub mod download;
pub mod platform;
pub mod user;
pub mod video;

pub use download::{DownloadStatus, UserDownload};
pub use platform::Platform;
pub use user::User;
pub use video::{VideoFormat, VideoInfo};
