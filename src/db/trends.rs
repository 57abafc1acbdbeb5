//! Mood trend storage: one row per user per calendar day.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::debug;

use crate::constants::DATE_FORMAT;
use crate::errors::{AppResult, DatabaseError};

use super::users::UserId;

/// A persisted mood observation for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodTrend {
    pub day: NaiveDate,
    pub mood: String,
    pub score: i64,
}

/// Inserts or overwrites the trend row for `(user, day)` in one statement.
///
/// Recomputing a summary later the same day replaces mood and score in
/// place; there is never more than one row per user per day, and readers
/// never observe a half-written pair.
pub fn upsert_trend(
    conn: &Connection,
    user: UserId,
    day: NaiveDate,
    mood: &str,
    score: i64,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO mood_trends (user_id, day, mood, score)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(user_id, day) DO UPDATE SET
             mood = excluded.mood,
             score = excluded.score",
        params![user.0, day.to_string(), mood, score],
    )
    .map_err(DatabaseError::Sqlite)?;

    debug!(user = user.0, %day, mood, score, "upserted mood trend");
    Ok(())
}

/// The trend row for one day, if any.
pub fn trend_for_day(conn: &Connection, user: UserId, day: NaiveDate) -> AppResult<Option<MoodTrend>> {
    let trend = conn
        .query_row(
            "SELECT day, mood, score FROM mood_trends WHERE user_id = ?1 AND day = ?2",
            params![user.0, day.to_string()],
            trend_from_row,
        )
        .optional()
        .map_err(DatabaseError::Sqlite)?;
    Ok(trend)
}

/// All trend rows for `user` in ascending day order.
pub fn list_trends(conn: &Connection, user: UserId) -> AppResult<Vec<MoodTrend>> {
    let mut stmt = conn
        .prepare(
            "SELECT day, mood, score FROM mood_trends
             WHERE user_id = ?1
             ORDER BY day ASC",
        )
        .map_err(DatabaseError::Sqlite)?;

    let rows = stmt
        .query_map(params![user.0], trend_from_row)
        .map_err(DatabaseError::Sqlite)?;

    let mut trends = Vec::new();
    for row in rows {
        trends.push(row.map_err(DatabaseError::Sqlite)?);
    }
    Ok(trends)
}

fn trend_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MoodTrend> {
    let raw: String = row.get(0)?;
    let day = NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(MoodTrend {
        day,
        mood: row.get(1)?,
        score: row.get(2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;
    use crate::db::users::ensure_user;

    fn test_conn() -> (Connection, UserId) {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        let user = ensure_user(&conn, "maya").unwrap();
        (conn, user)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn row_count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM mood_trends", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn upsert_inserts_a_fresh_row() {
        let (conn, user) = test_conn();
        upsert_trend(&conn, user, day(1), "Calm", 8).unwrap();

        assert_eq!(row_count(&conn), 1);
        let trend = trend_for_day(&conn, user, day(1)).unwrap().unwrap();
        assert_eq!(trend.mood, "Calm");
        assert_eq!(trend.score, 8);
    }

    #[test]
    fn upsert_overwrites_the_same_day_in_place() {
        let (conn, user) = test_conn();
        upsert_trend(&conn, user, day(1), "m1", 5).unwrap();
        upsert_trend(&conn, user, day(1), "m2", 9).unwrap();

        assert_eq!(row_count(&conn), 1);
        let trend = trend_for_day(&conn, user, day(1)).unwrap().unwrap();
        assert_eq!(trend.mood, "m2");
        assert_eq!(trend.score, 9);
    }

    #[test]
    fn upsert_with_identical_values_is_idempotent() {
        let (conn, user) = test_conn();
        upsert_trend(&conn, user, day(1), "Calm", 8).unwrap();
        upsert_trend(&conn, user, day(1), "Calm", 8).unwrap();

        assert_eq!(row_count(&conn), 1);
    }

    #[test]
    fn list_returns_days_ascending() {
        let (conn, user) = test_conn();
        upsert_trend(&conn, user, day(3), "c", 3).unwrap();
        upsert_trend(&conn, user, day(1), "a", 1).unwrap();
        upsert_trend(&conn, user, day(2), "b", 2).unwrap();

        let days: Vec<NaiveDate> = list_trends(&conn, user)
            .unwrap()
            .into_iter()
            .map(|t| t.day)
            .collect();
        assert_eq!(days, vec![day(1), day(2), day(3)]);
    }

    #[test]
    fn trend_for_day_misses_when_absent() {
        let (conn, user) = test_conn();
        assert_eq!(trend_for_day(&conn, user, day(1)).unwrap(), None);
    }

    #[test]
    fn trends_are_isolated_per_user() {
        let (conn, maya) = test_conn();
        let noor = ensure_user(&conn, "noor").unwrap();
        upsert_trend(&conn, maya, day(1), "Calm", 8).unwrap();

        assert!(list_trends(&conn, noor).unwrap().is_empty());
        assert_eq!(list_trends(&conn, maya).unwrap().len(), 1);
    }
}
