//! Expense CRUD operations
//!
//! Every query is scoped to the owning user; an expense belonging to
//! someone else behaves exactly like a missing one.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::{date_column, decimal_column, decimal_text, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Expense, ExpenseFilter, NewExpense};

const EXPENSE_COLUMNS: &str = "id, user_id, category, amount, date, description, created_at";

fn row_to_expense(row: &rusqlite::Row<'_>) -> rusqlite::Result<Expense> {
    let created_at_str: String = row.get(6)?;
    Ok(Expense {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category: row.get(2)?,
        amount: decimal_column(row, 3)?,
        date: date_column(row, 4)?,
        description: row.get(5)?,
        created_at: parse_datetime(&created_at_str),
    })
}

fn fetch_expense(conn: &Connection, user_id: i64, id: i64) -> Result<Option<Expense>> {
    let sql = format!(
        "SELECT {} FROM expenses WHERE id = ? AND user_id = ?",
        EXPENSE_COLUMNS
    );
    let expense = conn
        .query_row(&sql, params![id, user_id], row_to_expense)
        .optional()?;
    Ok(expense)
}

/// Trim and drop blank descriptions
fn clean_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

impl Database {
    /// Record a new expense
    pub fn create_expense(&self, user_id: i64, expense: &NewExpense) -> Result<Expense> {
        expense.validate()?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO expenses (user_id, category, amount, date, description) VALUES (?, ?, ?, ?, ?)",
            params![
                user_id,
                expense.category.trim(),
                decimal_text(expense.amount),
                expense.date.to_string(),
                clean_description(expense.description.as_deref()),
            ],
        )?;
        let id = conn.last_insert_rowid();
        info!(user_id, expense_id = id, "Recorded expense");

        fetch_expense(&conn, user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("Expense {} vanished after insert", id)))
    }

    /// Get one of the user's expenses
    pub fn get_expense(&self, user_id: i64, id: i64) -> Result<Option<Expense>> {
        let conn = self.conn()?;
        fetch_expense(&conn, user_id, id)
    }

    /// Replace an expense's fields; `None` if the user has no such expense
    pub fn update_expense(
        &self,
        user_id: i64,
        id: i64,
        expense: &NewExpense,
    ) -> Result<Option<Expense>> {
        expense.validate()?;

        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE expenses SET category = ?, amount = ?, date = ?, description = ? WHERE id = ? AND user_id = ?",
            params![
                expense.category.trim(),
                decimal_text(expense.amount),
                expense.date.to_string(),
                clean_description(expense.description.as_deref()),
                id,
                user_id,
            ],
        )?;

        if updated == 0 {
            return Ok(None);
        }
        info!(user_id, expense_id = id, "Updated expense");
        fetch_expense(&conn, user_id, id)
    }

    /// Delete an expense, returning whether a row was removed
    pub fn delete_expense(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM expenses WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        if deleted > 0 {
            info!(user_id, expense_id = id, "Deleted expense");
        }
        Ok(deleted > 0)
    }

    /// List expenses with optional category/date filters, newest first
    pub fn list_expenses_filtered(
        &self,
        user_id: i64,
        filter: &ExpenseFilter,
    ) -> Result<Vec<Expense>> {
        let mut sql = format!("SELECT {} FROM expenses WHERE user_id = ?", EXPENSE_COLUMNS);
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id)];

        if let Some(category) = &filter.category {
            sql.push_str(" AND category = ?");
            values.push(Box::new(category.clone()));
        }
        if let Some(from) = filter.from {
            sql.push_str(" AND date >= ?");
            values.push(Box::new(from.to_string()));
        }
        if let Some(to) = filter.to {
            sql.push_str(" AND date <= ?");
            values.push(Box::new(to.to_string()));
        }

        sql.push_str(" ORDER BY date DESC, created_at DESC, id DESC LIMIT ?");
        values.push(Box::new(filter.limit as i64));

        let refs: Vec<&dyn rusqlite::ToSql> = values.iter().map(|v| v.as_ref()).collect();

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let expenses = stmt
            .query_map(refs.as_slice(), row_to_expense)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(user_id, count = expenses.len(), "Listed expenses");
        Ok(expenses)
    }

    /// All of the user's expenses dated within `from..=to`, in insertion order
    pub fn list_expenses_between(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Expense>> {
        let sql = format!(
            "SELECT {} FROM expenses WHERE user_id = ? AND date BETWEEN ? AND ? ORDER BY id",
            EXPENSE_COLUMNS
        );
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let expenses = stmt
            .query_map(
                params![user_id, from.to_string(), to.to_string()],
                row_to_expense,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(expenses)
    }
}
