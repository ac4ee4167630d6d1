//! Income operations

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rusqlite::params;
use tracing::info;

use super::{date_column, decimal_column, decimal_text, parse_datetime, Database};
use crate::error::Result;
use crate::models::{Income, NewIncome};
use crate::money::checked_sum;

impl Database {
    /// Record an income payment
    pub fn add_income(&self, user_id: i64, income: &NewIncome) -> Result<Income> {
        income.validate()?;

        let source = income
            .source
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO income (user_id, amount, source, date) VALUES (?, ?, ?, ?)",
            params![
                user_id,
                decimal_text(income.amount),
                source,
                income.date.to_string()
            ],
        )?;
        let id = conn.last_insert_rowid();
        info!(user_id, income_id = id, "Recorded income");

        let created = conn.query_row(
            "SELECT id, user_id, amount, source, date, created_at FROM income WHERE id = ?",
            params![id],
            |row| {
                let created_at_str: String = row.get(5)?;
                Ok(Income {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    amount: decimal_column(row, 2)?,
                    source: row.get(3)?,
                    date: date_column(row, 4)?,
                    created_at: parse_datetime(&created_at_str),
                })
            },
        )?;
        Ok(created)
    }

    /// Total income dated within `from..=to`; zero when there is none
    pub fn sum_income_between(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Decimal> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT amount FROM income WHERE user_id = ? AND date BETWEEN ? AND ?")?;
        let amounts = stmt
            .query_map(params![user_id, from.to_string(), to.to_string()], |row| {
                decimal_column(row, 0)
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        checked_sum(amounts)
    }
}
