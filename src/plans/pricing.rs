use serde::Serialize;

use super::{DownloadLimit, PLAN_TIERS, PlanTier};
use crate::quality::VideoQuality;

/// Public-facing description of a tier. Limits are read from the tier table
/// so the marketing copy cannot drift from what the policy enforces.
#[derive(Debug, Clone, Serialize)]
pub struct PricingPlan {
    pub id: String,
    pub tier: PlanTier,
    pub price: String,
    pub billing_period: String,
    pub description: String,
    pub features: Vec<String>,
    pub is_popular: bool,
    pub download_limit: DownloadLimit,
    pub quality_limit: VideoQuality,
}

impl PricingPlan {
    #[must_use]
    pub fn for_tier(tier: PlanTier) -> Self {
        let limits = tier.limits();

        let (price, billing_period, description, extras): (&str, &str, &str, &[&str]) = match tier
        {
            PlanTier::Free => (
                "$0",
                "forever",
                "Perfect for occasional downloads",
                &["YouTube, Facebook support", "Basic support"],
            ),
            PlanTier::Pro => (
                "$9.99",
                "per month",
                "Great for regular users",
                &["All platforms support", "Priority support", "No ads"],
            ),
            PlanTier::Unlimited => (
                "$19.99",
                "per month",
                "Best for power users",
                &[
                    "All platforms support",
                    "Premium support",
                    "No ads",
                    "Batch downloading",
                ],
            ),
        };

        let downloads_line = match limits.download_limit {
            DownloadLimit::Limited(n) => format!("{n} downloads per day"),
            DownloadLimit::Unlimited => "Unlimited downloads".to_string(),
        };

        let mut features = vec![
            format!("Up to {} quality", limits.quality_ceiling),
            downloads_line,
        ];
        features.extend(extras.iter().map(|s| (*s).to_string()));

        Self {
            id: tier.as_str().to_lowercase(),
            tier,
            price: price.to_string(),
            billing_period: billing_period.to_string(),
            description: description.to_string(),
            features,
            is_popular: tier == PlanTier::Pro,
            download_limit: limits.download_limit,
            quality_limit: limits.quality_ceiling,
        }
    }
}

#[must_use]
pub fn pricing_plans() -> Vec<PricingPlan> {
    PLAN_TIERS.iter().copied().map(PricingPlan::for_tier).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_follows_limits() {
        let plans = pricing_plans();
        assert_eq!(plans.len(), 3);

        let free = &plans[0];
        assert_eq!(free.id, "free");
        assert_eq!(free.features[0], "Up to 720p quality");
        assert_eq!(free.features[1], "5 downloads per day");

        let unlimited = &plans[2];
        assert_eq!(unlimited.features[1], "Unlimited downloads");
        assert!(plans.iter().filter(|p| p.is_popular).count() == 1);
    }
}
