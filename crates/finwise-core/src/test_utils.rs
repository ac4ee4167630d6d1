//! Test utilities for finwise-core
//!
//! `MockStore` is an in-memory [`FinanceStore`] for engine tests. Records are
//! added with builder methods, and any operation can be made to fail to
//! exercise storage-failure paths.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::assistant::FinanceStore;
use crate::error::{Error, Result};
use crate::models::{ChatEntry, Expense, TrendPoint};
use crate::money::checked_sum;

/// Store operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    ListExpenses,
    SumIncome,
    GetBudget,
    ListMonthlyTotals,
    AppendChatEntry,
}

#[derive(Default)]
struct Inner {
    expenses: Vec<Expense>,
    income: Vec<(i64, Decimal, NaiveDate)>,
    budgets: HashMap<i64, Decimal>,
    chat: Vec<ChatEntry>,
    failures: HashSet<StoreOperation>,
    calls: Vec<StoreOperation>,
}

/// In-memory storage collaborator
#[derive(Default)]
pub struct MockStore {
    inner: Mutex<Inner>,
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(self, user_id: i64, amount: Decimal) -> Self {
        self.inner.lock().unwrap().budgets.insert(user_id, amount);
        self
    }

    pub fn with_expense(
        self,
        user_id: i64,
        category: &str,
        amount: Decimal,
        year: i32,
        month: u32,
        d: u32,
    ) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            let id = inner.expenses.len() as i64 + 1;
            inner.expenses.push(Expense {
                id,
                user_id,
                category: category.to_string(),
                amount,
                date: day(year, month, d),
                description: None,
                created_at: Utc::now(),
            });
        }
        self
    }

    pub fn with_income(self, user_id: i64, amount: Decimal, year: i32, month: u32, d: u32) -> Self {
        self.inner
            .lock()
            .unwrap()
            .income
            .push((user_id, amount, day(year, month, d)));
        self
    }

    /// Make every call to `operation` return a storage error
    pub fn fail_on(self, operation: StoreOperation) -> Self {
        self.inner.lock().unwrap().failures.insert(operation);
        self
    }

    /// Chat entries appended so far, oldest first
    pub fn chat_entries(&self) -> Vec<ChatEntry> {
        self.inner.lock().unwrap().chat.clone()
    }

    /// Operations invoked so far, in call order
    pub fn calls(&self) -> Vec<StoreOperation> {
        self.inner.lock().unwrap().calls.clone()
    }

    fn record(&self, operation: StoreOperation) -> Result<std::sync::MutexGuard<'_, Inner>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(operation);
        if inner.failures.contains(&operation) {
            return Err(Error::Database(rusqlite::Error::QueryReturnedNoRows));
        }
        Ok(inner)
    }
}

fn in_range(date: NaiveDate, from: NaiveDate, to: NaiveDate) -> bool {
    date >= from && date <= to
}

impl FinanceStore for MockStore {
    fn list_expenses(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Vec<Expense>> {
        let inner = self.record(StoreOperation::ListExpenses)?;
        Ok(inner
            .expenses
            .iter()
            .filter(|e| e.user_id == user_id && in_range(e.date, from, to))
            .cloned()
            .collect())
    }

    fn sum_income(&self, user_id: i64, from: NaiveDate, to: NaiveDate) -> Result<Decimal> {
        let inner = self.record(StoreOperation::SumIncome)?;
        checked_sum(
            inner
                .income
                .iter()
                .filter(|(user, _, date)| *user == user_id && in_range(*date, from, to))
                .map(|(_, amount, _)| *amount),
        )
    }

    fn get_budget(&self, user_id: i64) -> Result<Option<Decimal>> {
        let inner = self.record(StoreOperation::GetBudget)?;
        Ok(inner.budgets.get(&user_id).copied())
    }

    fn list_monthly_totals(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TrendPoint>> {
        let inner = self.record(StoreOperation::ListMonthlyTotals)?;
        let mut by_month: BTreeMap<(i32, u32), Vec<Decimal>> = BTreeMap::new();
        for expense in inner
            .expenses
            .iter()
            .filter(|e| e.user_id == user_id && in_range(e.date, from, to))
        {
            by_month
                .entry((expense.date.year(), expense.date.month()))
                .or_default()
                .push(expense.amount);
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

    fn append_chat_entry(&self, user_id: i64, message: &str, response: &str) -> Result<ChatEntry> {
        let mut inner = self.record(StoreOperation::AppendChatEntry)?;
        let entry = ChatEntry {
            id: inner.chat.len() as i64 + 1,
            user_id,
            message: message.to_string(),
            response: response.to_string(),
            created_at: Utc::now(),
        };
        inner.chat.push(entry.clone());
        Ok(entry)
    }
}
