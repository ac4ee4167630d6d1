//! Assistant command implementations

use anyhow::{Context, Result};
use finwise_core::db::Database;
use finwise_core::{Assistant, AssistantConfig};

use super::truncate;

pub fn cmd_ask(
    db: &Database,
    config: AssistantConfig,
    user_id: i64,
    message: &str,
    json: bool,
) -> Result<()> {
    let assistant = Assistant::with_config(db, config);
    let reply = assistant
        .ask(user_id, message)
        .context("Assistant could not answer")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        println!("{}", reply.response);
    }
    Ok(())
}

pub fn cmd_history(db: &Database, user_id: i64, limit: usize) -> Result<()> {
    let entries = db.list_chat_history(user_id, limit)?;

    if entries.is_empty() {
        println!("No conversation yet. Ask something with:");
        println!("  finwise ask how much did I spend on food");
        return Ok(());
    }

    println!();
    println!("💬 Conversation");
    println!("   ─────────────────────────────────────────────────────────────");
    for entry in entries {
        println!(
            "   {} │ you: {}",
            entry.created_at.format("%Y-%m-%d %H:%M"),
            truncate(&entry.message, 60)
        );
        for line in entry.response.lines() {
            println!("                    │ {}", line);
        }
    }

    Ok(())
}

pub fn cmd_history_clear(db: &Database, user_id: i64) -> Result<()> {
    let deleted = db.clear_chat_history(user_id)?;
    println!("✅ Cleared {} conversation entries", deleted);
    Ok(())
}
