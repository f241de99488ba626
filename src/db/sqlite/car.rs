//! SQLite CarRepository implementation.
//!
//! Driver assignments live in the cars_drivers link table; reads only
//! surface links to non-deleted drivers.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::helpers::{build_limit_offset_clause, build_order_clause};
use crate::db::utils::current_timestamp;
use crate::db::{Car, CarRepository, DbError, DbResult, Id, ListQuery, ListResult};

/// SQLx-backed car repository.
pub struct SqliteCarRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn map_car(row: &SqliteRow, driver_ids: Vec<Id>) -> Car {
    Car {
        id: row.get("id"),
        model: row.get("model"),
        manufacturer_id: row.get("manufacturer_id"),
        driver_ids,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl SqliteCarRepository<'_> {
    async fn driver_ids(&self, car_id: Id) -> DbResult<Vec<Id>> {
        sqlx::query_scalar(
            "SELECT cd.driver_id FROM cars_drivers cd \
             JOIN drivers d ON d.id = cd.driver_id \
             WHERE cd.car_id = ? AND d.is_deleted = 0 \
             ORDER BY cd.driver_id",
        )
        .bind(car_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })
    }

    async fn replace_driver_links(&self, car_id: Id, driver_ids: &[Id]) -> DbResult<()> {
        sqlx::query("DELETE FROM cars_drivers WHERE car_id = ?")
            .bind(car_id)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        for driver_id in driver_ids {
            sqlx::query("INSERT OR IGNORE INTO cars_drivers (car_id, driver_id) VALUES (?, ?)")
                .bind(car_id)
                .bind(driver_id)
                .execute(self.pool)
                .await
                .map_err(|e| DbError::Database {
                    message: e.to_string(),
                })?;
        }

        Ok(())
    }

    async fn exists(&self, table: &str, entity_type: &str, id: Id) -> DbResult<()> {
        let sql = format!("SELECT COUNT(*) FROM {table} WHERE id = ? AND is_deleted = 0");
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        if count == 0 {
            return Err(DbError::not_found(entity_type, id));
        }

        Ok(())
    }
}

impl CarRepository for SqliteCarRepository<'_> {
    async fn create(&self, car: &Car) -> DbResult<Car> {
        let created_at = current_timestamp();
        let updated_at = created_at.clone();

        let result = sqlx::query(
            "INSERT INTO cars (model, manufacturer_id, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&car.model)
        .bind(car.manufacturer_id)
        .bind(&created_at)
        .bind(&updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        let id = result.last_insert_rowid();
        self.replace_driver_links(id, &car.driver_ids).await?;

        Ok(Car {
            id,
            model: car.model.clone(),
            manufacturer_id: car.manufacturer_id,
            driver_ids: car.driver_ids.clone(),
            created_at,
            updated_at,
        })
    }

    async fn get(&self, id: Id) -> DbResult<Car> {
        let row = sqlx::query(
            "SELECT id, model, manufacturer_id, created_at, updated_at FROM cars \
             WHERE id = ? AND is_deleted = 0",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        let row = row.ok_or_else(|| DbError::not_found("Car", id))?;
        let driver_ids = self.driver_ids(id).await?;

        Ok(map_car(&row, driver_ids))
    }

    async fn list(&self, query: Option<&ListQuery>) -> DbResult<ListResult<Car>> {
        let default_query = ListQuery::default();
        let query = query.unwrap_or(&default_query);
        let allowed_fields = ["model", "created_at", "updated_at"];

        let order_clause = build_order_clause(query, &allowed_fields, "created_at");
        let limit_clause = build_limit_offset_clause(query);

        let sql = format!(
            "SELECT id, model, manufacturer_id, created_at, updated_at FROM cars \
             WHERE is_deleted = 0 {order_clause}{limit_clause}"
        );

        let rows = sqlx::query(&sql)
            .fetch_all(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            let driver_ids = self.driver_ids(row.get("id")).await?;
            items.push(map_car(row, driver_ids));
        }

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars WHERE is_deleted = 0")
            .fetch_one(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(ListResult {
            items,
            total: total as usize,
            limit: query.limit,
            offset: query.offset.unwrap_or(0),
        })
    }

    async fn list_by_driver(&self, driver_id: Id) -> DbResult<Vec<Car>> {
        let rows = sqlx::query(
            "SELECT c.id, c.model, c.manufacturer_id, c.created_at, c.updated_at FROM cars c \
             JOIN cars_drivers cd ON cd.car_id = c.id \
             WHERE cd.driver_id = ? AND c.is_deleted = 0 \
             ORDER BY c.id",
        )
        .bind(driver_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        let mut cars = Vec::with_capacity(rows.len());
        for row in &rows {
            let driver_ids = self.driver_ids(row.get("id")).await?;
            cars.push(map_car(row, driver_ids));
        }

        Ok(cars)
    }

    async fn update(&self, car: &Car) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE cars SET model = ?, manufacturer_id = ?, updated_at = ? \
             WHERE id = ? AND is_deleted = 0",
        )
        .bind(&car.model)
        .bind(car.manufacturer_id)
        .bind(current_timestamp())
        .bind(car.id)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Car", car.id));
        }

        self.replace_driver_links(car.id, &car.driver_ids).await
    }

    async fn delete(&self, id: Id) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE cars SET is_deleted = 1, updated_at = ? WHERE id = ? AND is_deleted = 0",
        )
        .bind(current_timestamp())
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Car", id));
        }

        Ok(())
    }

    async fn add_driver(&self, car_id: Id, driver_id: Id) -> DbResult<()> {
        self.exists("cars", "Car", car_id).await?;
        self.exists("drivers", "Driver", driver_id).await?;

        // Insert the relationship (ignore if it already exists)
        sqlx::query("INSERT OR IGNORE INTO cars_drivers (car_id, driver_id) VALUES (?, ?)")
            .bind(car_id)
            .bind(driver_id)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(())
    }

    async fn remove_driver(&self, car_id: Id, driver_id: Id) -> DbResult<()> {
        self.exists("cars", "Car", car_id).await?;

        sqlx::query("DELETE FROM cars_drivers WHERE car_id = ? AND driver_id = ?")
            .bind(car_id)
            .bind(driver_id)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(())
    }
}
