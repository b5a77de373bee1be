use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Video hosting platforms recognised by URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Platform {
    #[default]
    YouTube,
    TikTok,
    Facebook,
    Instagram,
    Twitter,
    Vimeo,
}

pub const PLATFORMS: [Platform; 6] = [
    Platform::YouTube,
    Platform::TikTok,
    Platform::Facebook,
    Platform::Instagram,
    Platform::Twitter,
    Platform::Vimeo,
];

// Checked in order; first match wins.
const URL_MARKERS: [(&str, Platform); 8] = [
    ("youtube", Platform::YouTube),
    ("youtu.be", Platform::YouTube),
    ("tiktok", Platform::TikTok),
    ("facebook", Platform::Facebook),
    ("fb.com", Platform::Facebook),
    ("instagram", Platform::Instagram),
    ("twitter", Platform::Twitter),
    ("vimeo", Platform::Vimeo),
];

impl Platform {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::YouTube => "YouTube",
            Self::TikTok => "TikTok",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::Twitter => "Twitter",
            Self::Vimeo => "Vimeo",
        }
    }

    /// Guesses the platform from a URL. Unrecognised hosts fall back to
    /// YouTube.
    #[must_use]
    pub fn detect(url: &str) -> Self {
        let lower = url.to_lowercase();
        URL_MARKERS
            .iter()
            .find(|(marker, _)| lower.contains(marker))
            .map(|(_, platform)| *platform)
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn thumbnail_url(&self) -> &'static str {
        match self {
            Self::YouTube => "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg",
            Self::TikTok => {
                "https://i.pinimg.com/originals/c9/6b/6e/c96b6e549899b7155e86d31b3c3b747c.jpg"
            }
            Self::Facebook => {
                "https://cdn.pixabay.com/photo/2021/02/08/15/38/social-media-5995266_960_720.jpg"
            }
            Self::Instagram => {
                "https://cdn.pixabay.com/photo/2018/11/13/21/43/instagram-3814055_960_720.png"
            }
            Self::Twitter => {
                "https://cdn.pixabay.com/photo/2018/05/08/21/29/twitter-3384010_960_720.png"
            }
            Self::Vimeo => {
                "https://cdn.pixabay.com/photo/2016/11/18/11/16/social-1834011_960_720.jpg"
            }
        }
    }

    #[must_use]
    pub const fn sample_titles(&self) -> &'static [&'static str] {
        match self {
            Self::YouTube => &[
                "Ultimate Guide to Modern Web Development",
                "The Best Tech Review of 2023",
                "How to Build Your First App in 10 Minutes",
            ],
            Self::TikTok => &[
                "This Dance Trend Is Taking Over",
                "Wait For It... #Viral",
                "Quick Life Hack You Need to Know",
            ],
            Self::Facebook => &[
                "Our Amazing Family Vacation 2023",
                "Company Anniversary Celebration",
                "Live Q&A Session with Our CEO",
            ],
            Self::Instagram => &[
                "Morning Routine for Productivity",
                "Behind the Scenes of Our Photoshoot",
                "New Collection Sneak Peek",
            ],
            Self::Twitter => &[
                "Breaking News: Tech Conference Highlights",
                "This Thread Will Change How You Think",
                "Live Update from the Event",
            ],
            Self::Vimeo => &[
                "Award-winning Short Film: Echoes",
                "Professional Studio Setup Tutorial",
                "Cinematic Travel Montage: Japan",
            ],
        }
    }

    /// Short-form platforms only serve a narrow band of qualities.
    #[must_use]
    pub const fn is_short_form(&self) -> bool {
        matches!(self, Self::TikTok | Self::Instagram)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PLATFORMS
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown platform: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_platform() {
        assert_eq!(
            Platform::detect("https://www.youtube.com/watch?v=abc"),
            Platform::YouTube
        );
        assert_eq!(Platform::detect("https://youtu.be/abc"), Platform::YouTube);
        assert_eq!(
            Platform::detect("https://www.tiktok.com/@user/video/1"),
            Platform::TikTok
        );
        assert_eq!(Platform::detect("https://fb.com/watch/1"), Platform::Facebook);
        assert_eq!(
            Platform::detect("https://VIMEO.com/12345"),
            Platform::Vimeo
        );
    }

    #[test]
    fn test_detect_unknown_falls_back() {
        assert_eq!(
            Platform::detect("https://example.com/video.mp4"),
            Platform::YouTube
        );
    }

    #[test]
    fn test_parse_platform() {
        assert_eq!("tiktok".parse::<Platform>().unwrap(), Platform::TikTok);
        assert!("myspace".parse::<Platform>().is_err());
    }
}
