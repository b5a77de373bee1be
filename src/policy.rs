//! Download quota and quality gating.
//!
//! [`evaluate`] is a pure function of the plan tier, the number of downloads
//! the user has already completed in the current period, and the quality
//! being requested. Denial is an ordinary return value; only the string entry
//! point [`evaluate_labels`] can fail, and only when handed a tier or quality
//! outside the closed sets.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::plans::{DownloadLimit, PlanTier};
use crate::quality::VideoQuality;

/// Invalid input to the policy: the caller and the evaluator disagree on the
/// set of tiers or qualities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("unknown plan tier: {0}")]
    UnknownTier(String),

    #[error("unknown video quality: {0}")]
    UnknownQuality(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    QuotaExceeded,
    QualityNotPermitted,
}

impl DenialReason {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::QuotaExceeded => "quota_exceeded",
            Self::QualityNotPermitted => "quality_not_permitted",
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuotaExceeded => write!(f, "download quota exceeded"),
            Self::QualityNotPermitted => write!(f, "quality not permitted by plan"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum DownloadDecision {
    Allowed,
    Denied(DenialReason),
}

impl DownloadDecision {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    #[must_use]
    pub const fn denial_reason(&self) -> Option<DenialReason> {
        match self {
            Self::Allowed => None,
            Self::Denied(reason) => Some(*reason),
        }
    }
}

/// A single download request as seen by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadAttempt {
    pub tier: PlanTier,
    pub current_downloads: u32,
    pub requested_quality: VideoQuality,
}

impl DownloadAttempt {
    #[must_use]
    pub const fn new(tier: PlanTier, current_downloads: u32, requested_quality: VideoQuality) -> Self {
        Self {
            tier,
            current_downloads,
            requested_quality,
        }
    }

    #[must_use]
    pub fn evaluate(&self) -> DownloadDecision {
        evaluate(self.tier, self.current_downloads, self.requested_quality)
    }
}

/// Decides whether a download may proceed.
///
/// The quota is checked first: reaching the limit blocks the next attempt
/// regardless of quality. A request exactly at the tier's quality ceiling is
/// permitted. `current_downloads` is ignored for unlimited tiers.
#[must_use]
pub fn evaluate(
    tier: PlanTier,
    current_downloads: u32,
    requested_quality: VideoQuality,
) -> DownloadDecision {
    let limits = tier.limits();

    if limits.download_limit.is_reached(current_downloads) {
        return DownloadDecision::Denied(DenialReason::QuotaExceeded);
    }

    if requested_quality.exceeds(limits.quality_ceiling) {
        return DownloadDecision::Denied(DenialReason::QualityNotPermitted);
    }

    DownloadDecision::Allowed
}

/// String entry point for callers holding raw labels.
pub fn evaluate_labels(
    tier: &str,
    current_downloads: u32,
    requested_quality: &str,
) -> Result<DownloadDecision, PolicyError> {
    let tier: PlanTier = tier.parse()?;
    let quality: VideoQuality = requested_quality.parse()?;
    Ok(evaluate(tier, current_downloads, quality))
}

/// User-facing explanation for a denial.
#[must_use]
pub fn denial_message(tier: PlanTier, reason: DenialReason) -> String {
    let limits = tier.limits();

    match reason {
        DenialReason::QuotaExceeded => {
            let base = match limits.download_limit {
                DownloadLimit::Limited(n) => format!("{tier} plan limited to {n} downloads per day."),
                DownloadLimit::Unlimited => format!("{tier} plan download quota reached."),
            };
            match tier.upgrade() {
                Some(PlanTier::Unlimited) => {
                    format!("{base} Please upgrade to Unlimited for more downloads.")
                }
                Some(_) => format!("{base} Please upgrade your plan."),
                None => base,
            }
        }
        DenialReason::QualityNotPermitted => {
            let base = format!(
                "{tier} plan limited to {} quality.",
                limits.quality_ceiling
            );
            match tier.upgrade() {
                Some(PlanTier::Unlimited) => {
                    format!("{base} Please upgrade to Unlimited for 4K downloads.")
                }
                Some(_) => format!("{base} Please upgrade your plan for higher quality downloads."),
                None => base,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plans::PLAN_TIERS;
    use crate::quality::QUALITIES;

    #[test]
    fn test_quota_boundary_for_limited_tiers() {
        for tier in PLAN_TIERS {
            let limits = tier.limits();
            let DownloadLimit::Limited(limit) = limits.download_limit else {
                continue;
            };
            let quality = limits.quality_ceiling;

            assert_eq!(evaluate(tier, limit - 1, quality), DownloadDecision::Allowed);
            assert_eq!(
                evaluate(tier, limit, quality),
                DownloadDecision::Denied(DenialReason::QuotaExceeded)
            );
        }
    }

    #[test]
    fn test_unlimited_tier_never_quota_denied() {
        for count in [0, 1, 30, 10_000, u32::MAX] {
            for quality in QUALITIES {
                assert_ne!(
                    evaluate(PlanTier::Unlimited, count, quality),
                    DownloadDecision::Denied(DenialReason::QuotaExceeded)
                );
            }
        }
    }

    #[test]
    fn test_quality_ceiling_boundary() {
        for tier in PLAN_TIERS {
            let ceiling = tier.limits().quality_ceiling;
            assert_eq!(evaluate(tier, 0, ceiling), DownloadDecision::Allowed);

            if let Some(above) = ceiling.next() {
                assert_eq!(
                    evaluate(tier, 0, above),
                    DownloadDecision::Denied(DenialReason::QualityNotPermitted)
                );
            }
        }
    }

    #[test]
    fn test_deterministic() {
        for tier in PLAN_TIERS {
            for quality in QUALITIES {
                for count in [0, 4, 5, 29, 30] {
                    assert_eq!(
                        evaluate(tier, count, quality),
                        evaluate(tier, count, quality)
                    );
                }
            }
        }
    }

    #[test]
    fn test_free_at_quota_denied_regardless_of_quality() {
        assert_eq!(
            evaluate(PlanTier::Free, 5, VideoQuality::P480),
            DownloadDecision::Denied(DenialReason::QuotaExceeded)
        );
    }

    #[test]
    fn test_free_above_ceiling_denied() {
        assert_eq!(
            evaluate(PlanTier::Free, 2, VideoQuality::P1080),
            DownloadDecision::Denied(DenialReason::QualityNotPermitted)
        );
    }

    #[test]
    fn test_pro_last_slot_at_ceiling_allowed() {
        assert_eq!(
            evaluate(PlanTier::Pro, 29, VideoQuality::P1080),
            DownloadDecision::Allowed
        );
    }

    #[test]
    fn test_unlimited_heavy_user_4k_allowed() {
        assert_eq!(
            evaluate(PlanTier::Unlimited, 10_000, VideoQuality::K4),
            DownloadDecision::Allowed
        );
    }

    #[test]
    fn test_attempt_matches_function() {
        let attempt = DownloadAttempt::new(PlanTier::Pro, 30, VideoQuality::P240);
        assert_eq!(
            attempt.evaluate(),
            DownloadDecision::Denied(DenialReason::QuotaExceeded)
        );
    }

    #[test]
    fn test_evaluate_labels() {
        assert_eq!(
            evaluate_labels("free", 0, "720p").unwrap(),
            DownloadDecision::Allowed
        );
        assert_eq!(
            evaluate_labels("Gold", 0, "720p"),
            Err(PolicyError::UnknownTier("Gold".to_string()))
        );
        assert_eq!(
            evaluate_labels("Free", 0, "8K"),
            Err(PolicyError::UnknownQuality("8K".to_string()))
        );
    }

    #[test]
    fn test_denial_messages() {
        assert_eq!(
            denial_message(PlanTier::Free, DenialReason::QuotaExceeded),
            "Free plan limited to 5 downloads per day. Please upgrade your plan."
        );
        assert_eq!(
            denial_message(PlanTier::Free, DenialReason::QualityNotPermitted),
            "Free plan limited to 720p quality. Please upgrade your plan for higher quality downloads."
        );
        assert_eq!(
            denial_message(PlanTier::Pro, DenialReason::QuotaExceeded),
            "Pro plan limited to 30 downloads per day. Please upgrade to Unlimited for more downloads."
        );
        assert_eq!(
            denial_message(PlanTier::Pro, DenialReason::QualityNotPermitted),
            "Pro plan limited to 1080p quality. Please upgrade to Unlimited for 4K downloads."
        );
    }

    #[test]
    fn test_decision_serialization() {
        let json = serde_json::to_value(DownloadDecision::Denied(DenialReason::QuotaExceeded)).unwrap();
        assert_eq!(json["decision"], "denied");
        assert_eq!(json["reason"], "quota_exceeded");

        let json = serde_json::to_value(DownloadDecision::Allowed).unwrap();
        assert_eq!(json["decision"], "allowed");
    }
}
