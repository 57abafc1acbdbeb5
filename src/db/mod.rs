//! Database layer for mull.
//!
//! A pooled SQLite database holds three tables: `users`, `entries`, and
//! `mood_trends`. This module owns the pool; the submodules own the
//! queries.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use mull::db::Database;
//!
//! # fn main() -> mull::AppResult<()> {
//! let db = Database::open(Path::new("/tmp/journal.db"))?;
//! db.initialize_schema()?;
//! let conn = db.get_conn()?;
//! # Ok(())
//! # }
//! ```

pub mod entries;
pub mod schema;
pub mod trends;
pub mod users;

use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use tracing::{debug, info};

use crate::errors::{AppResult, DatabaseError};

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

const MAX_POOL_SIZE: u32 = 5;

/// Handle to the SQLite database. Cheap to clone, all clones share the
/// pool.
#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens (or creates) the database file and builds the connection
    /// pool. Foreign keys are switched on per pooled connection since
    /// SQLite scopes that pragma to the connection.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at {}", db_path.display());
        let manager = SqliteConnectionManager::file(db_path)
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        let pool = Pool::builder()
            .max_size(MAX_POOL_SIZE)
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        info!("Database opened at {}", db_path.display());
        Ok(Database { pool })
    }

    /// Borrows a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool is exhausted or the connection cannot
    /// be established.
    pub fn get_conn(&self) -> AppResult<PooledConnection> {
        self.pool.get().map_err(|e| DatabaseError::Pool(e).into())
    }

    /// Creates all tables and indexes if they do not exist. Safe to call
    /// on every startup.
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        info!("Database schema initialized");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_creates_the_database_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("journal.db");

        let db = Database::open(&path).unwrap();
        db.initialize_schema().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn initialize_schema_twice_is_harmless() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(&dir.path().join("journal.db")).unwrap();

        db.initialize_schema().unwrap();
        db.initialize_schema().unwrap();
    }

    #[test]
    fn clones_share_the_same_database() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(&dir.path().join("journal.db")).unwrap();
        db.initialize_schema().unwrap();

        let clone = db.clone();
        let user = users::ensure_user(&db.get_conn().unwrap(), "maya").unwrap();
        let found = users::find_user(&clone.get_conn().unwrap(), "maya").unwrap();
        assert_eq!(found, Some(user));
    }
}
