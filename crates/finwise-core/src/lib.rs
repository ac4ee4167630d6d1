//! FinWise Core Library
//!
//! Shared functionality for the FinWise personal finance assistant:
//! - Database access and migrations (the storage collaborator)
//! - Domain models for expenses, income, budgets and chat history
//! - Calendar-month windows
//! - Overflow-checked currency arithmetic
//! - Assistant configuration
//! - The financial query/insight engine

pub mod assistant;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod money;
pub mod period;

/// Test utilities including an in-memory storage collaborator
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use assistant::{
    Assistant, AssistantReply, FinanceStore, Intent, IntentClassifier, Metrics, MonthlySummary,
    ResponseSynthesizer,
};
pub use config::AssistantConfig;
pub use db::Database;
pub use error::{Error, Result};
pub use models::{
    Budget, BudgetStatus, CategoryTotal, ChatEntry, Expense, ExpenseFilter, ExpenseStats, Income,
    NewExpense, NewIncome, TrendPoint, User,
};
