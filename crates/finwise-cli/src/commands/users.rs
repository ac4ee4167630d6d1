//! User command implementations

use anyhow::Result;
use finwise_core::db::Database;

pub fn cmd_users_add(db: &Database, name: &str, email: &str) -> Result<()> {
    let id = db.create_user(name, email)?;
    println!("✅ Created user {} ({})", id, email.trim().to_lowercase());
    println!("   Use --user {} to act as this user.", id);
    Ok(())
}

pub fn cmd_users_list(db: &Database) -> Result<()> {
    let users = db.list_users()?;

    if users.is_empty() {
        println!("No users yet. Create the local user with:");
        println!("  finwise init");
        return Ok(());
    }

    println!();
    println!("👤 Users");
    println!("   ─────────────────────────────────────────────────────────────");
    for user in users {
        println!("   [{}] {} <{}>", user.id, user.full_name, user.email);
    }

    Ok(())
}
