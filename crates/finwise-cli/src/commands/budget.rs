//! Budget command implementations

use anyhow::{Context, Result};
use finwise_core::assistant::{format_money, format_percent};
use finwise_core::db::Database;
use rust_decimal::Decimal;

use super::today;

pub fn cmd_budget_set(db: &Database, user_id: i64, amount: Decimal) -> Result<()> {
    let budget = db
        .set_budget(user_id, amount)
        .context("Failed to set budget")?;
    println!(
        "✅ Monthly budget set to {}",
        format_money(budget.monthly_budget)
    );
    Ok(())
}

pub fn cmd_budget_show(db: &Database, user_id: i64) -> Result<()> {
    let reference = today();
    let Some(status) = db.get_budget_status(user_id, reference)? else {
        println!("No monthly budget set. Set one with:");
        println!("  finwise budget set 1500");
        return Ok(());
    };

    println!();
    println!("🎯 Budget for {}", reference.format("%B %Y"));
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Budget:    {:>12}", format_money(status.monthly_budget));
    println!("   Spent:     {:>12}", format_money(status.spent));
    println!("   Remaining: {:>12}", format_money(status.remaining));
    println!("   Used:      {:>12}", format_percent(status.usage_percent));

    if status.remaining < Decimal::ZERO {
        println!();
        println!("   ⚠️  Over budget by {}", format_money(-status.remaining));
    }

    Ok(())
}
