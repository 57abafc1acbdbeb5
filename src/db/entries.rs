//! Journal entry storage.
//!
//! The analysis side of the crate only ever reads entries; the write
//! operations here are thin owner-scoped wrappers used by the CLI. Every
//! query is keyed by [`UserId`], no operation can cross user boundaries.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};
use tracing::debug;

use crate::constants::{DATE_FORMAT, DATETIME_FORMAT};
use crate::errors::{AppResult, DatabaseError};

use super::users::{require_user, UserId};

/// A single journal entry as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: i64,
    pub user_id: UserId,
    pub content: String,
    pub created_at: NaiveDateTime,
}

/// Inserts an entry for `user` timestamped `at`, returning the new row id.
///
/// The timestamp is supplied by the caller so the whole crate shares one
/// clock; nothing here asks SQLite for the current time.
pub fn add_entry(
    conn: &Connection,
    user: UserId,
    content: &str,
    at: NaiveDateTime,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO entries (user_id, content, created_at) VALUES (?1, ?2, ?3)",
        params![user.0, content, at.format(DATETIME_FORMAT).to_string()],
    )
    .map_err(DatabaseError::Sqlite)?;

    let id = conn.last_insert_rowid();
    debug!(user = user.0, entry = id, "added entry");
    Ok(id)
}

/// Rewrites the content of an entry owned by `user`.
///
/// # Errors
///
/// [`DatabaseError::NotFound`] when no row matches both the id and the
/// owner; a caller cannot tell someone else's entry from a missing one.
pub fn update_entry(
    conn: &Connection,
    user: UserId,
    entry_id: i64,
    content: &str,
) -> AppResult<()> {
    let changed = conn
        .execute(
            "UPDATE entries SET content = ?1 WHERE id = ?2 AND user_id = ?3",
            params![content, entry_id, user.0],
        )
        .map_err(DatabaseError::Sqlite)?;

    if changed == 0 {
        return Err(DatabaseError::NotFound(format!("entry {entry_id}")).into());
    }
    debug!(user = user.0, entry = entry_id, "updated entry");
    Ok(())
}

/// Deletes an entry owned by `user`.
pub fn delete_entry(conn: &Connection, user: UserId, entry_id: i64) -> AppResult<()> {
    let changed = conn
        .execute(
            "DELETE FROM entries WHERE id = ?1 AND user_id = ?2",
            params![entry_id, user.0],
        )
        .map_err(DatabaseError::Sqlite)?;

    if changed == 0 {
        return Err(DatabaseError::NotFound(format!("entry {entry_id}")).into());
    }
    debug!(user = user.0, entry = entry_id, "deleted entry");
    Ok(())
}

/// All entries for `user`, newest first.
///
/// An empty journal is a normal outcome; only an invalid user id is an
/// error.
pub fn entries_for(conn: &Connection, user: UserId) -> AppResult<Vec<Entry>> {
    require_user(conn, user)?;

    let mut stmt = conn
        .prepare(
            "SELECT id, user_id, content, created_at FROM entries
             WHERE user_id = ?1
             ORDER BY created_at DESC, id DESC",
        )
        .map_err(DatabaseError::Sqlite)?;

    let rows = stmt
        .query_map(params![user.0], |row| {
            let raw: String = row.get(3)?;
            let created_at = NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    3,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            Ok(Entry {
                id: row.get(0)?,
                user_id: UserId(row.get(1)?),
                content: row.get(2)?,
                created_at,
            })
        })
        .map_err(DatabaseError::Sqlite)?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(row.map_err(DatabaseError::Sqlite)?);
    }
    debug!(user = user.0, count = entries.len(), "loaded entries");
    Ok(entries)
}

/// The set of distinct calendar days on which `user` wrote anything.
pub fn distinct_entry_dates(conn: &Connection, user: UserId) -> AppResult<HashSet<NaiveDate>> {
    require_user(conn, user)?;

    let mut stmt = conn
        .prepare("SELECT DISTINCT date(created_at) FROM entries WHERE user_id = ?1")
        .map_err(DatabaseError::Sqlite)?;

    let rows = stmt
        .query_map(params![user.0], |row| {
            let raw: String = row.get(0)?;
            NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })
        })
        .map_err(DatabaseError::Sqlite)?;

    let mut dates = HashSet::new();
    for row in rows {
        dates.insert(row.map_err(DatabaseError::Sqlite)?);
    }
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;
    use crate::db::users::ensure_user;
    use crate::errors::AppError;

    fn test_conn() -> (Connection, UserId) {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        let user = ensure_user(&conn, "maya").unwrap();
        (conn, user)
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn entries_come_back_newest_first() {
        let (conn, user) = test_conn();
        add_entry(&conn, user, "first", at(1, 9)).unwrap();
        add_entry(&conn, user, "second", at(2, 9)).unwrap();
        add_entry(&conn, user, "third", at(2, 21)).unwrap();

        let entries = entries_for(&conn, user).unwrap();
        let contents: Vec<&str> = entries.iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, vec!["third", "second", "first"]);
    }

    #[test]
    fn timestamps_round_trip_exactly() {
        let (conn, user) = test_conn();
        let written = at(5, 14);
        add_entry(&conn, user, "note", written).unwrap();

        let entries = entries_for(&conn, user).unwrap();
        assert_eq!(entries[0].created_at, written);
        assert_eq!(entries[0].user_id, user);
    }

    #[test]
    fn empty_journal_is_ok_and_empty() {
        let (conn, user) = test_conn();
        assert!(entries_for(&conn, user).unwrap().is_empty());
        assert!(distinct_entry_dates(&conn, user).unwrap().is_empty());
    }

    #[test]
    fn unknown_user_is_an_error() {
        let (conn, _) = test_conn();
        let err = entries_for(&conn, UserId(999)).unwrap_err();
        assert!(matches!(err, AppError::UnknownUser(999)));

        let err = distinct_entry_dates(&conn, UserId(999)).unwrap_err();
        assert!(matches!(err, AppError::UnknownUser(999)));
    }

    #[test]
    fn distinct_dates_collapse_same_day_entries() {
        let (conn, user) = test_conn();
        add_entry(&conn, user, "morning", at(3, 8)).unwrap();
        add_entry(&conn, user, "evening", at(3, 22)).unwrap();
        add_entry(&conn, user, "next day", at(4, 8)).unwrap();

        let dates = distinct_entry_dates(&conn, user).unwrap();
        assert_eq!(dates.len(), 2);
        assert!(dates.contains(&NaiveDate::from_ymd_opt(2026, 1, 3).unwrap()));
        assert!(dates.contains(&NaiveDate::from_ymd_opt(2026, 1, 4).unwrap()));
    }

    #[test]
    fn update_rewrites_content() {
        let (conn, user) = test_conn();
        let id = add_entry(&conn, user, "draft", at(1, 9)).unwrap();
        update_entry(&conn, user, id, "final").unwrap();

        let entries = entries_for(&conn, user).unwrap();
        assert_eq!(entries[0].content, "final");
    }

    #[test]
    fn delete_removes_the_row() {
        let (conn, user) = test_conn();
        let id = add_entry(&conn, user, "gone soon", at(1, 9)).unwrap();
        delete_entry(&conn, user, id).unwrap();

        assert!(entries_for(&conn, user).unwrap().is_empty());
        let err = delete_entry(&conn, user, id).unwrap_err();
        assert!(matches!(
            err,
            AppError::Database(DatabaseError::NotFound(_))
        ));
    }

    #[test]
    fn writes_cannot_cross_user_boundaries() {
        let (conn, maya) = test_conn();
        let noor = ensure_user(&conn, "noor").unwrap();
        let id = add_entry(&conn, maya, "mine", at(1, 9)).unwrap();

        assert!(update_entry(&conn, noor, id, "stolen").is_err());
        assert!(delete_entry(&conn, noor, id).is_err());
        assert_eq!(entries_for(&conn, maya).unwrap()[0].content, "mine");
        assert!(entries_for(&conn, noor).unwrap().is_empty());
    }
}
