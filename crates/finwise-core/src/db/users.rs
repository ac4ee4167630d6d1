//! User operations

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::User;

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let created_at_str: String = row.get(3)?;
    Ok(User {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Create a user, returning its ID
    ///
    /// Emails are unique (case-insensitive); a duplicate is rejected.
    pub fn create_user(&self, full_name: &str, email: &str) -> Result<i64> {
        let full_name = full_name.trim();
        let email = email.trim().to_lowercase();
        if full_name.is_empty() || email.is_empty() {
            return Err(Error::Validation(
                "Full name and email are required".to_string(),
            ));
        }

        let conn = self.conn()?;
        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM users WHERE email = ?",
                params![email],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(Error::InvalidData(format!(
                "User with email {} already exists",
                email
            )));
        }

        conn.execute(
            "INSERT INTO users (full_name, email) VALUES (?, ?)",
            params![full_name, email],
        )?;
        let id = conn.last_insert_rowid();
        info!(user_id = id, "Created user");
        Ok(id)
    }

    /// Get a user by ID
    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, full_name, email, created_at FROM users WHERE id = ?",
                params![id],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    /// List all users
    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, full_name, email, created_at FROM users ORDER BY id")?;
        let users = stmt
            .query_map([], row_to_user)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Ensure a user with this ID exists, creating a placeholder if needed
    ///
    /// Used by `finwise init` to provision the default local user.
    pub fn ensure_user(&self, id: i64, full_name: &str, email: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR IGNORE INTO users (id, full_name, email) VALUES (?, ?, ?)",
            params![id, full_name, email.trim().to_lowercase()],
        )?;
        Ok(())
    }
}
