//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db, load_config, date helpers)
//! - `users` - User management commands
//! - `expenses` - Expense commands (add, list, show, update, delete)
//! - `income` - Income commands (add, total)
//! - `budget` - Budget commands (set, show)
//! - `reports` - Monthly statistics
//! - `assistant` - Assistant questions and conversation history

pub mod assistant;
pub mod budget;
pub mod core;
pub mod expenses;
pub mod income;
pub mod reports;
pub mod users;

// Re-export command functions for main.rs
pub use assistant::*;
pub use budget::*;
pub use core::*;
pub use expenses::*;
pub use income::*;
pub use reports::*;
pub use users::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
