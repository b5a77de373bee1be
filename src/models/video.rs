use serde::{Deserialize, Serialize};

use super::Platform;
use crate::quality::{VideoQuality, parse_quality_from_label};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFormat {
    pub id: String,

    pub label: String,

    pub quality: VideoQuality,

    pub container: String,

    pub file_size: String,

    #[serde(default)]
    pub audio_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub id: String,

    pub url: String,

    pub title: String,

    pub description: String,

    pub thumbnail_url: String,

    pub platform: Platform,

    pub author: String,

    pub duration: String,

    pub view_count: String,

    pub available_formats: Vec<VideoFormat>,
}

// (label, container, size). Labels without a quality are audio-only.
const FORMAT_CATALOG: [(&str, &str, &str); 8] = [
    ("240p", "MP4", "10 MB"),
    ("360p", "MP4", "20 MB"),
    ("480p", "MP4", "40 MB"),
    ("720p", "MP4", "80 MB"),
    ("1080p", "MP4", "160 MB"),
    ("2K", "MP4", "300 MB"),
    ("4K", "MP4", "600 MB"),
    ("MP3 Audio", "MP3", "5 MB"),
];

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

impl VideoInfo {
    /// Builds metadata for a URL. The same URL always yields the same id,
    /// title and format list.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let platform = Platform::detect(url);
        let seed = stable_seed(url);
        let id = format!("{:012x}", seed & 0xffff_ffff_ffff);

        let titles = platform.sample_titles();
        let title = titles[usize::try_from(seed % titles.len() as u64).unwrap_or(0)].to_string();

        let minutes = (seed >> 8) % 30 + 1;
        let seconds = (seed >> 16) % 60;
        let views = (seed >> 24) % 1_000_000;

        Self {
            id: id.clone(),
            url: url.to_string(),
            title,
            description: format!("Video hosted on {platform}."),
            thumbnail_url: platform.thumbnail_url().to_string(),
            platform,
            author: "Content Creator".to_string(),
            duration: format!("{minutes}:{seconds:02}"),
            view_count: format!("{views} views"),
            available_formats: formats_for(platform, &id),
        }
    }

    #[must_use]
    pub fn find_format(&self, format_id: &str) -> Option<&VideoFormat> {
        self.available_formats.iter().find(|f| f.id == format_id)
    }

    #[must_use]
    pub fn best_quality(&self) -> Option<VideoQuality> {
        self.available_formats
            .iter()
            .filter(|f| !f.audio_only)
            .map(|f| f.quality)
            .max()
    }
}

fn formats_for(platform: Platform, video_id: &str) -> Vec<VideoFormat> {
    FORMAT_CATALOG
        .iter()
        .enumerate()
        .map(|(i, (label, container, size))| {
            (i, label, container, size, parse_quality_from_label(label))
        })
        .filter(|(_, _, _, _, quality)| {
            !platform.is_short_form()
                || quality.is_some_and(|q| (VideoQuality::P480..=VideoQuality::P1080).contains(&q))
        })
        .map(|(i, label, container, size, quality)| VideoFormat {
            id: format!("fmt{}-{video_id}", i + 1),
            label: (*label).to_string(),
            // audio tracks sit at the bottom of the scale
            quality: quality.unwrap_or(VideoQuality::P240),
            container: (*container).to_string(),
            file_size: (*size).to_string(),
            audio_only: quality.is_none(),
        })
        .collect()
}

/// 64-bit FNV-1a over the trimmed URL. Fixed across builds and platforms, so
/// video ids stay stable between releases.
fn stable_seed(url: &str) -> u64 {
    url.trim().bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_url_same_video() {
        let a = VideoInfo::from_url("https://youtube.com/watch?v=abc");
        let b = VideoInfo::from_url("https://youtube.com/watch?v=abc");
        assert_eq!(a, b);
    }

    #[test]
    fn test_full_catalog_for_long_form() {
        let info = VideoInfo::from_url("https://vimeo.com/12345");
        assert_eq!(info.platform, Platform::Vimeo);
        assert_eq!(info.available_formats.len(), 8);
        assert_eq!(info.best_quality(), Some(VideoQuality::K4));
        assert!(info.available_formats.iter().any(|f| f.audio_only));
    }

    #[test]
    fn test_short_form_formats() {
        let info = VideoInfo::from_url("https://www.tiktok.com/@user/video/1");
        let qualities: Vec<_> = info.available_formats.iter().map(|f| f.quality).collect();
        assert_eq!(
            qualities,
            vec![VideoQuality::P480, VideoQuality::P720, VideoQuality::P1080]
        );
    }

    #[test]
    fn test_find_format() {
        let info = VideoInfo::from_url("https://youtube.com/watch?v=xyz");
        let first = info.available_formats[3].id.clone();
        assert_eq!(
            info.find_format(&first).map(|f| f.quality),
            Some(VideoQuality::P720)
        );
        assert!(info.find_format("nope").is_none());
    }

    #[test]
    fn test_stable_seed_is_fnv1a() {
        assert_eq!(stable_seed(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(stable_seed("a"), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(stable_seed("  a\n"), stable_seed("a"));
    }

    #[test]
    fn test_video_id_pinned() {
        let info = VideoInfo::from_url("a");
        assert_eq!(info.id, "dc4c8601ec8c");
    }

    #[test]
    fn test_catalog_qualities_come_from_labels() {
        let info = VideoInfo::from_url("https://vimeo.com/labels");
        for format in &info.available_formats {
            match parse_quality_from_label(&format.label) {
                Some(quality) => {
                    assert_eq!(format.quality, quality);
                    assert!(!format.audio_only);
                }
                None => assert!(format.audio_only),
            }
        }
    }

    #[test]
    fn test_duration_format() {
        let info = VideoInfo::from_url("https://youtube.com/watch?v=dur");
        let (m, s) = info.duration.split_once(':').unwrap();
        assert!(m.parse::<u32>().unwrap() >= 1);
        assert_eq!(s.len(), 2);
    }
}
