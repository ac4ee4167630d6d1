//! Income command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use finwise_core::assistant::format_money;
use finwise_core::db::Database;
use finwise_core::models::NewIncome;
use finwise_core::period::month_bounds;
use rust_decimal::Decimal;

use super::{resolve_month, today};

pub fn cmd_income_add(
    db: &Database,
    user_id: i64,
    amount: Decimal,
    source: Option<&str>,
    date: Option<NaiveDate>,
) -> Result<()> {
    let income = db
        .add_income(
            user_id,
            &NewIncome {
                amount,
                source: source.map(str::to_string),
                date: date.unwrap_or_else(today),
            },
        )
        .context("Failed to record income")?;

    println!(
        "✅ Recorded income {}: {} on {}{}",
        income.id,
        format_money(income.amount),
        income.date,
        income
            .source
            .as_deref()
            .map(|s| format!(" from {}", s))
            .unwrap_or_default()
    );
    Ok(())
}

pub fn cmd_income_total(
    db: &Database,
    user_id: i64,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<()> {
    let reference = resolve_month(year, month)?;
    let (from, to) = month_bounds(reference)?;
    let total = db.sum_income_between(user_id, from, to)?;

    println!(
        "💰 Income for {}: {}",
        reference.format("%B %Y"),
        format_money(total)
    );
    Ok(())
}
