//! Expense command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use finwise_core::assistant::format_money;
use finwise_core::db::Database;
use finwise_core::models::{Expense, ExpenseFilter, NewExpense};
use rust_decimal::Decimal;

use super::{today, truncate};

fn new_expense(
    category: &str,
    amount: Decimal,
    date: Option<NaiveDate>,
    description: Option<&str>,
) -> NewExpense {
    let mut expense = NewExpense::new(category, amount, date.unwrap_or_else(today));
    if let Some(description) = description {
        expense = expense.with_description(description);
    }
    expense
}

fn print_expense(expense: &Expense) {
    println!(
        "   [{}] {} │ {:>10} │ {:<14} │ {}",
        expense.id,
        expense.date,
        format_money(expense.amount),
        truncate(&expense.category, 14),
        truncate(expense.description.as_deref().unwrap_or(""), 30)
    );
}

pub fn cmd_expenses_add(
    db: &Database,
    user_id: i64,
    category: &str,
    amount: Decimal,
    date: Option<NaiveDate>,
    description: Option<&str>,
) -> Result<()> {
    let expense = db
        .create_expense(user_id, &new_expense(category, amount, date, description))
        .context("Failed to record expense")?;

    println!("✅ Recorded expense {}:", expense.id);
    print_expense(&expense);
    Ok(())
}

pub fn cmd_expenses_list(
    db: &Database,
    user_id: i64,
    category: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    limit: usize,
) -> Result<()> {
    let filter = ExpenseFilter {
        category,
        from,
        to,
        limit,
    };
    let expenses = db.list_expenses_filtered(user_id, &filter)?;

    if expenses.is_empty() {
        println!("No expenses found. Record one with:");
        println!("  finwise expenses add -c Food -a 12.50");
        return Ok(());
    }

    println!();
    println!("📝 Expenses");
    println!("   ─────────────────────────────────────────────────────────────");
    for expense in &expenses {
        print_expense(expense);
    }

    let total: Decimal = expenses.iter().map(|e| e.amount).sum();
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {} expenses, {} total", expenses.len(), format_money(total));

    Ok(())
}

pub fn cmd_expenses_show(db: &Database, user_id: i64, id: i64) -> Result<()> {
    let expense = db
        .get_expense(user_id, id)?
        .ok_or_else(|| anyhow::anyhow!("Expense {} not found", id))?;

    println!();
    println!("📄 Expense {}", expense.id);
    println!("   Category:    {}", expense.category);
    println!("   Amount:      {}", format_money(expense.amount));
    println!("   Date:        {}", expense.date);
    if let Some(description) = &expense.description {
        println!("   Description: {}", description);
    }
    println!("   Recorded:    {}", expense.created_at.format("%Y-%m-%d %H:%M"));

    Ok(())
}

pub fn cmd_expenses_update(
    db: &Database,
    user_id: i64,
    id: i64,
    category: &str,
    amount: Decimal,
    date: Option<NaiveDate>,
    description: Option<&str>,
) -> Result<()> {
    let expense = db
        .update_expense(user_id, id, &new_expense(category, amount, date, description))?
        .ok_or_else(|| anyhow::anyhow!("Expense {} not found", id))?;

    println!("✅ Updated expense {}:", id);
    print_expense(&expense);
    Ok(())
}

pub fn cmd_expenses_delete(db: &Database, user_id: i64, id: i64) -> Result<()> {
    if !db.delete_expense(user_id, id)? {
        anyhow::bail!("Expense {} not found", id);
    }
    println!("✅ Deleted expense {}", id);
    Ok(())
}
