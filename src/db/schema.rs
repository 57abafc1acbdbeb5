//! Schema definitions for the mull database.

use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use crate::errors::{AppResult, DatabaseError};

/// Current schema version, bumped on incompatible changes.
pub const SCHEMA_VERSION: i32 = 1;

/// Creates all tables, indexes, and the version row. Idempotent.
///
/// Timestamps are TEXT in server-local time; `mood_trends` carries a
/// `UNIQUE(user_id, day)` constraint so the analysis upsert can resolve
/// conflicts in a single statement.
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    debug!("Creating database tables if they don't exist");

    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL DEFAULT (datetime('now', 'localtime'))
        );

        CREATE TABLE IF NOT EXISTS entries (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_entries_user_created
            ON entries(user_id, created_at DESC);

        CREATE TABLE IF NOT EXISTS mood_trends (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            day TEXT NOT NULL,
            mood TEXT NOT NULL,
            score INTEGER NOT NULL,
            UNIQUE(user_id, day)
        );

        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );
        ",
    )
    .map_err(DatabaseError::Sqlite)?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [SCHEMA_VERSION],
    )
    .map_err(DatabaseError::Sqlite)?;

    Ok(())
}

/// Reads the stored schema version. `None` means the version table is
/// empty, which only happens on databases predating it.
pub fn schema_version(conn: &Connection) -> AppResult<Option<i32>> {
    let version = conn
        .query_row(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(DatabaseError::Sqlite)?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .map(Result::unwrap)
            .collect()
    }

    #[test]
    fn creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        let names = table_names(&conn);
        assert!(names.contains(&"users".to_string()));
        assert!(names.contains(&"entries".to_string()));
        assert!(names.contains(&"mood_trends".to_string()));
        assert!(names.contains(&"schema_version".to_string()));
    }

    #[test]
    fn create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();

        assert_eq!(schema_version(&conn).unwrap(), Some(SCHEMA_VERSION));
    }

    #[test]
    fn records_the_schema_version() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), Some(SCHEMA_VERSION));
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO entries (user_id, content, created_at) VALUES (999, 'x', '2026-01-01 09:00:00')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn mood_trends_rejects_duplicate_user_day_pairs() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn.execute("INSERT INTO users (username) VALUES ('maya')", [])
            .unwrap();

        conn.execute(
            "INSERT INTO mood_trends (user_id, day, mood, score) VALUES (1, '2026-01-01', 'Calm', 8)",
            [],
        )
        .unwrap();
        let duplicate = conn.execute(
            "INSERT INTO mood_trends (user_id, day, mood, score) VALUES (1, '2026-01-01', 'Tense', 3)",
            [],
        );
        assert!(duplicate.is_err());
    }
}
