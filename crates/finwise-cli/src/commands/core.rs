//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_config` - Resolve the assistant configuration
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use finwise_core::db::Database;
use finwise_core::period::month_of;
use finwise_core::AssistantConfig;

/// ID of the user provisioned by `finwise init`
pub const LOCAL_USER_ID: i64 = 1;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Load the assistant config from `--config`, the data dir override, or the embedded default
pub fn load_config(path: Option<&Path>) -> Result<AssistantConfig> {
    match path {
        Some(path) => AssistantConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => AssistantConfig::load().context("Failed to load assistant config"),
    }
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// First day of the requested month, defaulting to the current month/year
pub fn resolve_month(year: Option<i32>, month: Option<u32>) -> Result<NaiveDate> {
    let today = today();
    let year = year.unwrap_or(today.year());
    let month = month.unwrap_or(today.month());
    month_of(year, month).context("Invalid --month/--year")
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;

    db.ensure_user(LOCAL_USER_ID, "Local user", "local@localhost")
        .context("Failed to create the local user")?;
    println!("   Local user ready (id {})", LOCAL_USER_ID);

    let encrypted = db
        .is_encrypted()
        .context("Failed to check encryption state")?;
    if encrypted {
        println!("   🔒 Encryption: ENABLED");
    } else if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   ⚠️  Encryption: DISABLED (SQLite was built without SQLCipher)");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Set a budget: finwise budget set 1500");
    println!("  2. Record spending: finwise expenses add -c Food -a 12.50");
    println!("  3. Ask a question: finwise ask am I on track with my budget");

    Ok(())
}
