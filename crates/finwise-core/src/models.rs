//! Domain models for FinWise

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::money::validate_amount;

/// Default row limit for expense listings
pub const DEFAULT_EXPENSE_LIMIT: usize = 100;

/// A registered user. Authentication lives outside this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    /// Free-text label chosen by the user
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Expense input for create and update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl NewExpense {
    pub fn new(category: impl Into<String>, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            category: category.into(),
            amount,
            date,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Reject blank categories and amounts outside `0.01..=MAX_AMOUNT`
    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(Error::Validation("Category is required".to_string()));
        }
        validate_amount(self.amount, "Amount")
    }
}

/// A recorded income payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: i64,
    pub user_id: i64,
    pub amount: Decimal,
    pub source: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Income input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIncome {
    pub amount: Decimal,
    pub source: Option<String>,
    pub date: NaiveDate,
}

impl NewIncome {
    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount, "Amount")
    }
}

/// The user's single active monthly budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub user_id: i64,
    pub monthly_budget: Decimal,
    pub updated_at: DateTime<Utc>,
}

/// Budget compared against one month of spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub monthly_budget: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    /// Rounded to 2 decimals; zero when the budget is zero
    pub usage_percent: Decimal,
}

/// Filters for listing expenses
#[derive(Debug, Clone)]
pub struct ExpenseFilter {
    /// Exact category match
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: usize,
}

impl Default for ExpenseFilter {
    fn default() -> Self {
        Self {
            category: None,
            from: None,
            to: None,
            limit: DEFAULT_EXPENSE_LIMIT,
        }
    }
}

/// One line of the assistant conversation log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

/// Spending in one category over a window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Total spending in one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// 1-12
    pub month: u32,
    pub year: i32,
    pub total: Decimal,
}

/// Monthly statistics for the expenses dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStats {
    pub total_expenses: Decimal,
    pub by_category: Vec<CategoryTotal>,
    pub trend: Vec<TrendPoint>,
}
