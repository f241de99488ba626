//! SQLite ManufacturerRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::helpers::{build_limit_offset_clause, build_order_clause};
use crate::db::utils::current_timestamp;
use crate::db::{DbError, DbResult, Id, ListQuery, ListResult, Manufacturer, ManufacturerRepository};

/// SQLx-backed manufacturer repository.
pub struct SqliteManufacturerRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn map_manufacturer(row: &SqliteRow) -> Manufacturer {
    Manufacturer {
        id: row.get("id"),
        name: row.get("name"),
        country: row.get("country"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl ManufacturerRepository for SqliteManufacturerRepository<'_> {
    async fn create(&self, manufacturer: &Manufacturer) -> DbResult<Manufacturer> {
        let created_at = current_timestamp();
        let updated_at = created_at.clone();

        let result = sqlx::query(
            "INSERT INTO manufacturers (name, country, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&manufacturer.name)
        .bind(&manufacturer.country)
        .bind(&created_at)
        .bind(&updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(Manufacturer {
            id: result.last_insert_rowid(),
            name: manufacturer.name.clone(),
            country: manufacturer.country.clone(),
            created_at,
            updated_at,
        })
    }

    async fn get(&self, id: Id) -> DbResult<Manufacturer> {
        let row = sqlx::query(
            "SELECT id, name, country, created_at, updated_at FROM manufacturers \
             WHERE id = ? AND is_deleted = 0",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        let row = row.ok_or_else(|| DbError::not_found("Manufacturer", id))?;

        Ok(map_manufacturer(&row))
    }

    async fn list(&self, query: Option<&ListQuery>) -> DbResult<ListResult<Manufacturer>> {
        let default_query = ListQuery::default();
        let query = query.unwrap_or(&default_query);
        let allowed_fields = ["name", "country", "created_at", "updated_at"];

        let order_clause = build_order_clause(query, &allowed_fields, "created_at");
        let limit_clause = build_limit_offset_clause(query);

        let sql = format!(
            "SELECT id, name, country, created_at, updated_at FROM manufacturers \
             WHERE is_deleted = 0 {order_clause}{limit_clause}"
        );

        let rows = sqlx::query(&sql)
            .fetch_all(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM manufacturers WHERE is_deleted = 0")
                .fetch_one(self.pool)
                .await
                .map_err(|e| DbError::Database {
                    message: e.to_string(),
                })?;

        Ok(ListResult {
            items: rows.iter().map(map_manufacturer).collect(),
            total: total as usize,
            limit: query.limit,
            offset: query.offset.unwrap_or(0),
        })
    }

    async fn update(&self, manufacturer: &Manufacturer) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE manufacturers SET name = ?, country = ?, updated_at = ? \
             WHERE id = ? AND is_deleted = 0",
        )
        .bind(&manufacturer.name)
        .bind(&manufacturer.country)
        .bind(current_timestamp())
        .bind(manufacturer.id)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Manufacturer", manufacturer.id));
        }

        Ok(())
    }

    async fn delete(&self, id: Id) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE manufacturers SET is_deleted = 1, updated_at = ? WHERE id = ? AND is_deleted = 0",
        )
        .bind(current_timestamp())
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Manufacturer", id));
        }

        Ok(())
    }
}
