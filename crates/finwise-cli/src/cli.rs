//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

/// FinWise - Ask questions about your spending
#[derive(Parser)]
#[command(name = "finwise")]
#[command(about = "Personal finance tracker with a built-in assistant", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "finwise.db", global = true)]
    pub db: PathBuf,

    /// User ID to act as
    #[arg(long, default_value = "1", global = true)]
    pub user: i64,

    /// Assistant config file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set FINWISE_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and the default local user
    Init,

    /// Manage users
    Users {
        #[command(subcommand)]
        action: Option<UsersAction>,
    },

    /// Manage expenses (add, list, show, update, delete)
    Expenses {
        #[command(subcommand)]
        action: Option<ExpensesAction>,
    },

    /// Record and total income
    Income {
        #[command(subcommand)]
        action: IncomeAction,
    },

    /// Set or show the monthly budget
    Budget {
        #[command(subcommand)]
        action: Option<BudgetAction>,
    },

    /// Show monthly spending statistics
    Stats {
        /// Month (1-12), defaults to the current month
        #[arg(long)]
        month: Option<u32>,

        /// Year, defaults to the current year
        #[arg(long)]
        year: Option<i32>,
    },

    /// Ask the assistant a question
    Ask {
        /// The question, e.g. "am I on track with my budget?"
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,

        /// Print the reply as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the assistant conversation log
    History {
        /// Number of most recent entries to show (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Delete the conversation log instead of showing it
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
pub enum UsersAction {
    /// Create a user
    Add {
        /// Full name
        #[arg(long)]
        name: String,

        /// Email address (unique)
        #[arg(long)]
        email: String,
    },

    /// List users
    List,
}

#[derive(Subcommand)]
pub enum ExpensesAction {
    /// Record an expense
    Add {
        /// Category label (e.g., "Food")
        #[arg(short, long)]
        category: String,

        /// Amount spent
        #[arg(short, long)]
        amount: Decimal,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Optional description
        #[arg(long)]
        description: Option<String>,
    },

    /// List expenses, newest first
    List {
        /// Exact category filter
        #[arg(short, long)]
        category: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Maximum number of expenses to show
        #[arg(short, long, default_value = "100")]
        limit: usize,
    },

    /// Show one expense
    Show {
        /// Expense ID
        id: i64,
    },

    /// Replace an expense's fields
    Update {
        /// Expense ID
        id: i64,

        #[arg(short, long)]
        category: String,

        #[arg(short, long)]
        amount: Decimal,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum IncomeAction {
    /// Record income
    Add {
        /// Amount received
        #[arg(short, long)]
        amount: Decimal,

        /// Source (e.g., "Salary")
        #[arg(short, long)]
        source: Option<String>,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Total income for a month
    Total {
        #[arg(long)]
        month: Option<u32>,

        #[arg(long)]
        year: Option<i32>,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Set the monthly budget
    Set {
        /// Monthly budget amount
        amount: Decimal,
    },

    /// Show budget status for the current month
    Show,
}
