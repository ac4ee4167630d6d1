//! Monthly budget operations

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::{decimal_column, decimal_text, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Budget, BudgetStatus};
use crate::money::{checked_diff, checked_sum, percent_of, validate_amount};
use crate::period::month_bounds;

impl Database {
    /// Set the user's monthly budget (insert or replace; last write wins)
    pub fn set_budget(&self, user_id: i64, monthly_budget: Decimal) -> Result<Budget> {
        if monthly_budget <= Decimal::ZERO {
            return Err(Error::Validation(
                "Valid monthly budget is required".to_string(),
            ));
        }
        validate_amount(monthly_budget, "Monthly budget")?;

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO budget (user_id, monthly_budget) VALUES (?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                monthly_budget = excluded.monthly_budget,
                updated_at = CURRENT_TIMESTAMP
            "#,
            params![user_id, decimal_text(monthly_budget)],
        )?;
        info!(user_id, "Monthly budget set");

        drop(conn);
        self.get_budget(user_id)?
            .ok_or_else(|| Error::NotFound(format!("Budget for user {}", user_id)))
    }

    /// Get the user's budget row, if one has been set
    pub fn get_budget(&self, user_id: i64) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                "SELECT user_id, monthly_budget, updated_at FROM budget WHERE user_id = ?",
                params![user_id],
                |row| {
                    let updated_at_str: String = row.get(2)?;
                    Ok(Budget {
                        user_id: row.get(0)?,
                        monthly_budget: decimal_column(row, 1)?,
                        updated_at: parse_datetime(&updated_at_str),
                    })
                },
            )
            .optional()?;
        Ok(budget)
    }

    /// Compare the budget with spending in the month of `reference_date`
    ///
    /// Returns `None` when no budget is set.
    pub fn get_budget_status(
        &self,
        user_id: i64,
        reference_date: NaiveDate,
    ) -> Result<Option<BudgetStatus>> {
        let Some(budget) = self.get_budget(user_id)? else {
            return Ok(None);
        };

        let (from, to) = month_bounds(reference_date)?;
        let spent = checked_sum(
            self.list_expenses_between(user_id, from, to)?
                .iter()
                .map(|e| e.amount),
        )?;

        let monthly_budget = budget.monthly_budget;
        let usage_percent = if monthly_budget > Decimal::ZERO {
            percent_of(spent, monthly_budget)?
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        } else {
            Decimal::ZERO
        };

        Ok(Some(BudgetStatus {
            monthly_budget,
            spent,
            remaining: checked_diff(monthly_budget, spent)?,
            usage_percent,
        }))
    }
}
