//! Subscription plan tiers and the authoritative limits table.
//!
//! Every place that needs to know what a tier may do reads it from
//! [`PlanTier::limits`]; pricing metadata lives alongside in [`pricing`].

pub mod pricing;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::policy::PolicyError;
use crate::quality::VideoQuality;

pub use pricing::{PricingPlan, pricing_plans};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PlanTier {
    #[default]
    Free,
    Pro,
    Unlimited,
}

pub const PLAN_TIERS: [PlanTier; 3] = [PlanTier::Free, PlanTier::Pro, PlanTier::Unlimited];

/// Maximum number of completed downloads per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadLimit {
    Limited(u32),
    Unlimited,
}

impl DownloadLimit {
    /// Whether `completed` downloads already use up the allowance.
    #[must_use]
    pub const fn is_reached(&self, completed: u32) -> bool {
        match self {
            Self::Limited(limit) => completed >= *limit,
            Self::Unlimited => false,
        }
    }

    #[must_use]
    pub const fn remaining(&self, completed: u32) -> Option<u32> {
        match self {
            Self::Limited(limit) => Some(limit.saturating_sub(completed)),
            Self::Unlimited => None,
        }
    }
}

impl fmt::Display for DownloadLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(limit) => write!(f, "{limit}"),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

// Serialized as a bare number or the string "unlimited".
impl Serialize for DownloadLimit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Limited(limit) => serializer.serialize_u32(*limit),
            Self::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}

impl<'de> Deserialize<'de> for DownloadLimit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u32),
            Word(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Count(limit) => Ok(Self::Limited(limit)),
            Raw::Word(word) if word.eq_ignore_ascii_case("unlimited") => Ok(Self::Unlimited),
            Raw::Word(word) => Err(serde::de::Error::custom(format!(
                "invalid download limit: {word}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanLimits {
    pub download_limit: DownloadLimit,
    pub quality_ceiling: VideoQuality,
}

impl PlanTier {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Pro => "Pro",
            Self::Unlimited => "Unlimited",
        }
    }

    #[must_use]
    pub const fn limits(&self) -> PlanLimits {
        match self {
            Self::Free => PlanLimits {
                download_limit: DownloadLimit::Limited(5),
                quality_ceiling: VideoQuality::P720,
            },
            Self::Pro => PlanLimits {
                download_limit: DownloadLimit::Limited(30),
                quality_ceiling: VideoQuality::P1080,
            },
            Self::Unlimited => PlanLimits {
                download_limit: DownloadLimit::Unlimited,
                quality_ceiling: VideoQuality::K4,
            },
        }
    }

    /// The next tier up, used when suggesting an upgrade.
    #[must_use]
    pub const fn upgrade(&self) -> Option<Self> {
        match self {
            Self::Free => Some(Self::Pro),
            Self::Pro => Some(Self::Unlimited),
            Self::Unlimited => None,
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PLAN_TIERS
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| PolicyError::UnknownTier(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_table() {
        let free = PlanTier::Free.limits();
        assert_eq!(free.download_limit, DownloadLimit::Limited(5));
        assert_eq!(free.quality_ceiling, VideoQuality::P720);

        let pro = PlanTier::Pro.limits();
        assert_eq!(pro.download_limit, DownloadLimit::Limited(30));
        assert_eq!(pro.quality_ceiling, VideoQuality::P1080);

        let unlimited = PlanTier::Unlimited.limits();
        assert_eq!(unlimited.download_limit, DownloadLimit::Unlimited);
        assert_eq!(unlimited.quality_ceiling, VideoQuality::K4);
    }

    #[test]
    fn test_limit_reached() {
        let limit = DownloadLimit::Limited(5);
        assert!(!limit.is_reached(4));
        assert!(limit.is_reached(5));
        assert!(limit.is_reached(6));
        assert!(!DownloadLimit::Unlimited.is_reached(u32::MAX));
    }

    #[test]
    fn test_remaining() {
        assert_eq!(DownloadLimit::Limited(5).remaining(2), Some(3));
        assert_eq!(DownloadLimit::Limited(5).remaining(9), Some(0));
        assert_eq!(DownloadLimit::Unlimited.remaining(9), None);
    }

    #[test]
    fn test_download_limit_serde() {
        assert_eq!(serde_json::to_string(&DownloadLimit::Limited(5)).unwrap(), "5");
        assert_eq!(
            serde_json::to_string(&DownloadLimit::Unlimited).unwrap(),
            "\"unlimited\""
        );
        let parsed: DownloadLimit = serde_json::from_str("\"Unlimited\"").unwrap();
        assert_eq!(parsed, DownloadLimit::Unlimited);
        assert!(serde_json::from_str::<DownloadLimit>("\"lots\"").is_err());
    }

    #[test]
    fn test_parse_tier() {
        assert_eq!("Free".parse::<PlanTier>().unwrap(), PlanTier::Free);
        assert_eq!("pro".parse::<PlanTier>().unwrap(), PlanTier::Pro);
        assert_eq!("UNLIMITED".parse::<PlanTier>().unwrap(), PlanTier::Unlimited);
        assert!(matches!(
            "Gold".parse::<PlanTier>(),
            Err(PolicyError::UnknownTier(ref s)) if s == "Gold"
        ));
    }

    #[test]
    fn test_upgrade_path() {
        assert_eq!(PlanTier::Free.upgrade(), Some(PlanTier::Pro));
        assert_eq!(PlanTier::Pro.upgrade(), Some(PlanTier::Unlimited));
        assert_eq!(PlanTier::Unlimited.upgrade(), None);
    }
}
