//! User registry.
//!
//! A minimal stand-in for a real accounts system: just enough identity to
//! partition entries, trends, and cache slots per user.

use std::fmt;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::errors::{AppError, AppResult, DatabaseError};

/// Identifier partitioning all journal state.
///
/// A typed key rather than a formatted string, so the same value addresses
/// SQL rows, cache slots, and lock maps without ambiguity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns the id for `username`, creating the row if needed.
pub fn ensure_user(conn: &Connection, username: &str) -> AppResult<UserId> {
    conn.execute(
        "INSERT OR IGNORE INTO users (username) VALUES (?1)",
        params![username],
    )
    .map_err(DatabaseError::Sqlite)?;

    match find_user(conn, username)? {
        Some(id) => {
            debug!(user = id.0, username, "resolved user");
            Ok(id)
        }
        None => Err(DatabaseError::NotFound(format!("user '{username}'")).into()),
    }
}

/// Looks up a user by name.
pub fn find_user(conn: &Connection, username: &str) -> AppResult<Option<UserId>> {
    let id: Option<i64> = conn
        .query_row(
            "SELECT id FROM users WHERE username = ?1",
            params![username],
            |row| row.get(0),
        )
        .optional()
        .map_err(DatabaseError::Sqlite)?;
    Ok(id.map(UserId))
}

/// Whether a user row with this id exists.
pub fn user_exists(conn: &Connection, user: UserId) -> AppResult<bool> {
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
            params![user.0],
            |row| row.get(0),
        )
        .map_err(DatabaseError::Sqlite)?;
    Ok(exists)
}

/// Fails with [`AppError::UnknownUser`] unless `user` exists.
pub fn require_user(conn: &Connection, user: UserId) -> AppResult<()> {
    if user_exists(conn, user)? {
        Ok(())
    } else {
        Err(AppError::UnknownUser(user.0))
    }
}
