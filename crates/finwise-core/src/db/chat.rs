//! Assistant chat history

use rusqlite::params;
use tracing::info;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::ChatEntry;

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChatEntry> {
    let created_at_str: String = row.get(4)?;
    Ok(ChatEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        message: row.get(2)?,
        response: row.get(3)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Append one question/answer pair to the user's log
    pub fn append_chat(&self, user_id: i64, message: &str, response: &str) -> Result<ChatEntry> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO chat_history (user_id, message, response) VALUES (?, ?, ?)",
            params![user_id, message, response],
        )?;
        let id = conn.last_insert_rowid();

        let entry = conn.query_row(
            "SELECT id, user_id, message, response, created_at FROM chat_history WHERE id = ?",
            params![id],
            row_to_entry,
        )?;
        Ok(entry)
    }

    /// The `limit` most recent entries, oldest first
    pub fn list_chat_history(&self, user_id: i64, limit: usize) -> Result<Vec<ChatEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, message, response, created_at
            FROM chat_history
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )?;
        let mut entries = stmt
            .query_map(params![user_id, limit as i64], row_to_entry)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        entries.reverse();
        Ok(entries)
    }

    /// Delete the user's whole log, returning the number of entries removed
    pub fn clear_chat_history(&self, user_id: i64) -> Result<usize> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM chat_history WHERE user_id = ?",
            params![user_id],
        )?;
        info!(user_id, deleted, "Cleared chat history");
        Ok(deleted)
    }
}
