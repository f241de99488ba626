//! SQLite DriverRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::helpers::{build_limit_offset_clause, build_order_clause};
use crate::db::utils::current_timestamp;
use crate::db::{DbError, DbResult, Driver, DriverRepository, Id, ListQuery, ListResult};

/// SQLx-backed driver repository.
pub struct SqliteDriverRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

const DRIVER_COLUMNS: &str =
    "id, name, license_number, login, password_hash, created_at, updated_at";

fn map_driver(row: &SqliteRow) -> Driver {
    Driver {
        id: row.get("id"),
        name: row.get("name"),
        license_number: row.get("license_number"),
        login: row.get("login"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl DriverRepository for SqliteDriverRepository<'_> {
    async fn create(&self, driver: &Driver) -> DbResult<Driver> {
        // Always generate current timestamps - never use input timestamps
        let created_at = current_timestamp();
        let updated_at = created_at.clone();

        let result = sqlx::query(
            "INSERT INTO drivers (name, license_number, login, password_hash, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&driver.name)
        .bind(&driver.license_number)
        .bind(&driver.login)
        .bind(&driver.password_hash)
        .bind(&created_at)
        .bind(&updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(Driver {
            id: result.last_insert_rowid(),
            name: driver.name.clone(),
            license_number: driver.license_number.clone(),
            login: driver.login.clone(),
            password_hash: driver.password_hash.clone(),
            created_at,
            updated_at,
        })
    }

    async fn get(&self, id: Id) -> DbResult<Driver> {
        let sql = format!("SELECT {DRIVER_COLUMNS} FROM drivers WHERE id = ? AND is_deleted = 0");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        let row = row.ok_or_else(|| DbError::not_found("Driver", id))?;

        Ok(map_driver(&row))
    }

    async fn find_by_login(&self, login: &str) -> DbResult<Option<Driver>> {
        let sql =
            format!("SELECT {DRIVER_COLUMNS} FROM drivers WHERE login = ? AND is_deleted = 0");
        let row = sqlx::query(&sql)
            .bind(login)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(row.as_ref().map(map_driver))
    }

    async fn list(&self, query: Option<&ListQuery>) -> DbResult<ListResult<Driver>> {
        let default_query = ListQuery::default();
        let query = query.unwrap_or(&default_query);
        let allowed_fields = ["name", "login", "license_number", "created_at", "updated_at"];

        let order_clause = build_order_clause(query, &allowed_fields, "created_at");
        let limit_clause = build_limit_offset_clause(query);

        let sql = format!(
            "SELECT {DRIVER_COLUMNS} FROM drivers WHERE is_deleted = 0 {order_clause}{limit_clause}"
        );

        let rows = sqlx::query(&sql)
            .fetch_all(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM drivers WHERE is_deleted = 0")
            .fetch_one(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(ListResult {
            items: rows.iter().map(map_driver).collect(),
            total: total as usize,
            limit: query.limit,
            offset: query.offset.unwrap_or(0),
        })
    }

    async fn update(&self, driver: &Driver) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE drivers SET name = ?, license_number = ?, login = ?, password_hash = ?, updated_at = ? \
             WHERE id = ? AND is_deleted = 0",
        )
        .bind(&driver.name)
        .bind(&driver.license_number)
        .bind(&driver.login)
        .bind(&driver.password_hash)
        .bind(current_timestamp())
        .bind(driver.id)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Driver", driver.id));
        }

        Ok(())
    }

    async fn delete(&self, id: Id) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE drivers SET is_deleted = 1, updated_at = ? WHERE id = ? AND is_deleted = 0",
        )
        .bind(current_timestamp())
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Driver", id));
        }

        Ok(())
    }
}
