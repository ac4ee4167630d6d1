//! Spending reports: monthly totals and expense statistics

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rusqlite::params;

use super::{date_column, decimal_column, Database};
use crate::assistant::metrics::category_totals;
use crate::error::Result;
use crate::models::{ExpenseStats, TrendPoint};
use crate::money::checked_sum;
use crate::period::{month_bounds, month_of, trailing_months};

/// Months in the dashboard trend window
pub const STATS_TREND_MONTHS: u32 = 6;

impl Database {
    /// Total spending per calendar month within `from..=to`, ascending
    ///
    /// Months without expenses are omitted rather than zero-filled.
    pub fn list_monthly_totals(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TrendPoint>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT date, amount FROM expenses WHERE user_id = ? AND date BETWEEN ? AND ?")?;
        let rows = stmt
            .query_map(params![user_id, from.to_string(), to.to_string()], |row| {
                Ok((date_column(row, 0)?, decimal_column(row, 1)?))
            })?
            .collect::<std::result::Result<Vec<(NaiveDate, Decimal)>, _>>()?;

        let mut by_month: BTreeMap<(i32, u32), Vec<Decimal>> = BTreeMap::new();
        for (date, amount) in rows {
            by_month
                .entry((date.year(), date.month()))
                .or_default()
                .push(amount);
        }

        by_month
            .into_iter()
            .map(|((year, month), amounts)| {
                Ok(TrendPoint {
                    month,
                    year,
                    total: checked_sum(amounts)?,
                })
            })
            .collect()
    }

    /// Totals, per-category breakdown and six-month trend for one month
    pub fn expense_stats(&self, user_id: i64, year: i32, month: u32) -> Result<ExpenseStats> {
        let reference = month_of(year, month)?;
        let (from, to) = month_bounds(reference)?;

        let expenses = self.list_expenses_between(user_id, from, to)?;
        let by_category = category_totals(&expenses)?;
        let total_expenses = checked_sum(expenses.iter().map(|e| e.amount))?;

        let (trend_from, trend_to) = trailing_months(reference, STATS_TREND_MONTHS)?;
        let trend = self.list_monthly_totals(user_id, trend_from, trend_to)?;

        Ok(ExpenseStats {
            total_expenses,
            by_category,
            trend,
        })
    }
}
