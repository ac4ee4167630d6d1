//! Report command implementations

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use finwise_core::assistant::format_money;
use finwise_core::db::Database;

use super::{resolve_month, truncate};

pub fn cmd_stats(db: &Database, user_id: i64, year: Option<i32>, month: Option<u32>) -> Result<()> {
    let reference = resolve_month(year, month)?;
    let stats = db.expense_stats(user_id, reference.year(), reference.month())?;

    println!();
    println!("📊 Spending for {}", reference.format("%B %Y"));
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total: {}", format_money(stats.total_expenses));

    if stats.by_category.is_empty() {
        println!("   No expenses recorded this month.");
    } else {
        println!();
        println!("   By category:");
        for category in &stats.by_category {
            println!(
                "   {:<20} {:>12}",
                truncate(&category.category, 20),
                format_money(category.total)
            );
        }
    }

    if !stats.trend.is_empty() {
        println!();
        println!("   Trend:");
        for point in &stats.trend {
            let label = NaiveDate::from_ymd_opt(point.year, point.month, 1)
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_else(|| format!("{}-{:02}", point.year, point.month));
            println!("   {:<20} {:>12}", label, format_money(point.total));
        }
    }

    Ok(())
}
