//! SQLite database connection and migration management.

use std::path::Path;
use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::{
    SqliteCarRepository, SqliteDriverRepository, SqliteManufacturerRepository,
    SqliteOrderRepository,
};
use crate::db::{Database, DbError, DbResult};

// Embed migrations from migrations/ at compile time
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// SQLite database implementation.
///
/// Owns the connection pool; repositories borrow it per call.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open a database at the given path, creating the file if missing.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// The pool is pinned to a single long-lived connection: each pooled
    /// connection would otherwise see its own private memory database.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Access the underlying pool for advanced operations and test cleanup.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    type Drivers<'a> = SqliteDriverRepository<'a>;
    type Manufacturers<'a> = SqliteManufacturerRepository<'a>;
    type Cars<'a> = SqliteCarRepository<'a>;
    type Orders<'a> = SqliteOrderRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })
    }

    fn drivers(&self) -> Self::Drivers<'_> {
        SqliteDriverRepository { pool: &self.pool }
    }

    fn manufacturers(&self) -> Self::Manufacturers<'_> {
        SqliteManufacturerRepository { pool: &self.pool }
    }

    fn cars(&self) -> Self::Cars<'_> {
        SqliteCarRepository { pool: &self.pool }
    }

    fn orders(&self) -> Self::Orders<'_> {
        SqliteOrderRepository { pool: &self.pool }
    }
}
