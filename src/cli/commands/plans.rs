use crate::plans::pricing_plans;

pub fn cmd_plans() {
    let plans = pricing_plans();

    println!("{:<10} {:>8}  {:<12} {:<10}", "PLAN", "PRICE", "DOWNLOADS", "QUALITY");
    println!("{:-<44}", "");

    for plan in &plans {
        println!(
            "{:<10} {:>8}  {:<12} {:<10}",
            plan.tier.as_str(),
            plan.price,
            plan.download_limit.to_string(),
            plan.quality_limit.as_str(),
        );
    }

    println!();
    for plan in plans {
        let popular = if plan.is_popular { " (most popular)" } else { "" };
        println!("{} - {}{}", plan.tier, plan.description, popular);
        for feature in plan.features {
            println!("  • {feature}");
        }
    }
}
