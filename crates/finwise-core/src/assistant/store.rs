//! Storage collaborator contract
//!
//! The assistant never reaches for a global connection: whatever implements
//! `FinanceStore` is handed to it at construction time. `Database` is the
//! production implementation; `test_utils::MockStore` is the in-memory one.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::db::Database;
use crate::error::Result;
use crate::models::{ChatEntry, Expense, TrendPoint};

/// Reads and writes the assistant needs, all scoped to one user
pub trait FinanceStore {
    /// Expenses dated within `from..=to`, in a stable (insertion) order
    fn list_expenses(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Vec<Expense>>;

    /// Income dated within `from..=to`; zero when there is none
    fn sum_income(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Decimal>;

    /// Current monthly budget, if one has been set
    fn get_budget(&self, user_id: i64) -> Result<Option<Decimal>>;

    /// One point per month in `from..=to` that has at least one expense, ascending
    fn list_monthly_totals(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TrendPoint>>;

    /// Append a question/answer pair to the user's chat log
    fn append_chat_entry(&self, user_id: i64, message: &str, response: &str) -> Result<ChatEntry>;
}

impl FinanceStore for Database {
    fn list_expenses(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Vec<Expense>> {
        self.list_expenses_between(user_id, from, to)
    }

    fn sum_income(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Decimal> {
        self.sum_income_between(user_id, from, to)
    }

    fn get_budget(&self, user_id: i64) -> Result<Option<Decimal>> {
        Ok(Database::get_budget(self, user_id)?.map(|b| b.monthly_budget))
    }

    fn list_monthly_totals(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TrendPoint>> {
        Database::list_monthly_totals(self, user_id, from, to)
    }

    fn append_chat_entry(&self, user_id: i64, message: &str, response: &str) -> Result<ChatEntry> {
        self.append_chat(user_id, message, response)
    }
}

impl<T: FinanceStore + ?Sized> FinanceStore for &T {
    fn list_expenses(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Vec<Expense>> {
        (**self).list_expenses(user_id, from, to)
    }

    fn sum_income(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Decimal> {
        (**self).sum_income(user_id, from, to)
    }

    fn get_budget(&self, user_id: i64) -> Result<Option<Decimal>> {
        (**self).get_budget(user_id)
    }

    fn list_monthly_totals(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TrendPoint>> {
        (**self).list_monthly_totals(user_id, from, to)
    }

    fn append_chat_entry(&self, user_id: i64, message: &str, response: &str) -> Result<ChatEntry> {
        (**self).append_chat_entry(user_id, message, response)
    }
}

impl<T: FinanceStore + ?Sized> FinanceStore for Arc<T> {
    fn list_expenses(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Vec<Expense>> {
        (**self).list_expenses(user_id, from, to)
    }

    fn sum_income(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Decimal> {
        (**self).sum_income(user_id, from, to)
    }

    fn get_budget(&self, user_id: i64) -> Result<Option<Decimal>> {
        (**self).get_budget(user_id)
    }

    fn list_monthly_totals(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TrendPoint>> {
        (**self).list_monthly_totals(user_id, from, to)
    }

    fn append_chat_entry(&self, user_id: i64, message: &str, response: &str) -> Result<ChatEntry> {
        (**self).append_chat_entry(user_id, message, response)
    }
}
