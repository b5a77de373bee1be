use crate::policy::{DownloadDecision, denial_message, evaluate_labels};

/// Prints the decision and returns whether the download is allowed.
pub fn cmd_check(plan: &str, count: u32, quality: &str) -> anyhow::Result<bool> {
    let decision = evaluate_labels(plan, count, quality)?;

    match decision {
        DownloadDecision::Allowed => {
            println!("✓ Allowed: {plan} plan, {count} downloads so far, {quality}");
            Ok(true)
        }
        DownloadDecision::Denied(reason) => {
            // Labels parsed above, so the tier is valid here
            let tier = plan.parse()?;
            println!("✗ Denied ({})", reason.as_str());
            println!("  {}", denial_message(tier, reason));
            Ok(false)
        }
    }
}
