use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::policy::PolicyError;

/// Video quality on a totally ordered scale.
///
/// Variants are declared lowest first so the derived `Ord` is the ranking
/// used for plan ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VideoQuality {
    #[serde(rename = "240p")]
    P240,
    #[serde(rename = "360p")]
    P360,
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "2K")]
    K2,
    #[serde(rename = "4K")]
    K4,
}

pub const QUALITIES: [VideoQuality; 7] = [
    VideoQuality::P240,
    VideoQuality::P360,
    VideoQuality::P480,
    VideoQuality::P720,
    VideoQuality::P1080,
    VideoQuality::K2,
    VideoQuality::K4,
];

impl VideoQuality {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::P240 => "240p",
            Self::P360 => "360p",
            Self::P480 => "480p",
            Self::P720 => "720p",
            Self::P1080 => "1080p",
            Self::K2 => "2K",
            Self::K4 => "4K",
        }
    }

    /// Position on the scale, starting at 1 for 240p.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::P240 => 1,
            Self::P360 => 2,
            Self::P480 => 3,
            Self::P720 => 4,
            Self::P1080 => 5,
            Self::K2 => 6,
            Self::K4 => 7,
        }
    }

    /// Vertical resolution in pixels.
    #[must_use]
    pub const fn resolution(&self) -> u16 {
        match self {
            Self::P240 => 240,
            Self::P360 => 360,
            Self::P480 => 480,
            Self::P720 => 720,
            Self::P1080 => 1080,
            Self::K2 => 1440,
            Self::K4 => 2160,
        }
    }

    #[must_use]
    pub fn from_rank(rank: u8) -> Option<Self> {
        QUALITIES.iter().copied().find(|q| q.rank() == rank)
    }

    #[must_use]
    pub fn from_resolution(resolution: u16) -> Option<Self> {
        QUALITIES.iter().copied().find(|q| q.resolution() == resolution)
    }

    /// The next quality up the scale, if any.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        Self::from_rank(self.rank() + 1)
    }

    #[must_use]
    pub fn exceeds(&self, ceiling: Self) -> bool {
        *self > ceiling
    }
}

impl fmt::Display for VideoQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VideoQuality {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Some(q) = QUALITIES
            .iter()
            .copied()
            .find(|q| q.as_str().eq_ignore_ascii_case(trimmed))
        {
            return Ok(q);
        }

        // "1440p" and "2160p" are the resolution spellings of 2K and 4K
        let lower = trimmed.to_ascii_lowercase();
        lower
            .strip_suffix('p')
            .and_then(|n| n.parse::<u16>().ok())
            .and_then(Self::from_resolution)
            .ok_or_else(|| PolicyError::UnknownQuality(trimmed.to_string()))
    }
}
