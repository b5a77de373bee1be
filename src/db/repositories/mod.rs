pub mod download;
pub mod user;
pub mod video;
