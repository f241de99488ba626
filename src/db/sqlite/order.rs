//! SQLite OrderRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::helpers::{build_limit_offset_clause, build_order_clause};
use crate::db::utils::current_timestamp;
use crate::db::{DbError, DbResult, Id, ListQuery, ListResult, Order, OrderRepository};

/// SQLx-backed order repository.
pub struct SqliteOrderRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

const ORDER_COLUMNS: &str = "id, car_id, driver_id, passenger_name, pickup_address, \
                             dropoff_address, status, created_at, completed_at";

fn map_order(row: &SqliteRow) -> Order {
    let status: String = row.get("status");
    Order {
        id: row.get("id"),
        car_id: row.get("car_id"),
        driver_id: row.get("driver_id"),
        passenger_name: row.get("passenger_name"),
        pickup_address: row.get("pickup_address"),
        dropoff_address: row.get("dropoff_address"),
        status: status.parse().unwrap_or_default(),
        created_at: row.get("created_at"),
        completed_at: row.get("completed_at"),
    }
}

impl OrderRepository for SqliteOrderRepository<'_> {
    async fn create(&self, order: &Order) -> DbResult<Order> {
        let created_at = current_timestamp();
        let status_str = order.status.to_string();

        let result = sqlx::query(
            "INSERT INTO orders (car_id, driver_id, passenger_name, pickup_address, \
             dropoff_address, status, created_at, completed_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(order.car_id)
        .bind(order.driver_id)
        .bind(&order.passenger_name)
        .bind(&order.pickup_address)
        .bind(&order.dropoff_address)
        .bind(status_str)
        .bind(&created_at)
        .bind(&order.completed_at)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        Ok(Order {
            id: result.last_insert_rowid(),
            car_id: order.car_id,
            driver_id: order.driver_id,
            passenger_name: order.passenger_name.clone(),
            pickup_address: order.pickup_address.clone(),
            dropoff_address: order.dropoff_address.clone(),
            status: order.status,
            created_at,
            completed_at: order.completed_at.clone(),
        })
    }

    async fn get(&self, id: Id) -> DbResult<Order> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ? AND is_deleted = 0");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        let row = row.ok_or_else(|| DbError::not_found("Order", id))?;

        Ok(map_order(&row))
    }

    async fn list(&self, query: Option<&ListQuery>) -> DbResult<ListResult<Order>> {
        let default_query = ListQuery::default();
        let query = query.unwrap_or(&default_query);
        let allowed_fields = ["status", "passenger_name", "created_at", "completed_at"];

        let order_clause = build_order_clause(query, &allowed_fields, "created_at");
        let limit_clause = build_limit_offset_clause(query);

        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE is_deleted = 0 {order_clause}{limit_clause}"
        );

        let rows = sqlx::query(&sql)
            .fetch_all(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE is_deleted = 0")
            .fetch_one(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(ListResult {
            items: rows.iter().map(map_order).collect(),
            total: total as usize,
            limit: query.limit,
            offset: query.offset.unwrap_or(0),
        })
    }

    async fn list_by_driver(&self, driver_id: Id) -> DbResult<Vec<Order>> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE driver_id = ? AND is_deleted = 0 ORDER BY id"
        );
        let rows = sqlx::query(&sql)
            .bind(driver_id)
            .fetch_all(self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;

        Ok(rows.iter().map(map_order).collect())
    }

    async fn update(&self, order: &Order) -> DbResult<()> {
        let status_str = order.status.to_string();

        let result = sqlx::query(
            "UPDATE orders SET car_id = ?, driver_id = ?, passenger_name = ?, \
             pickup_address = ?, dropoff_address = ?, status = ?, completed_at = ? \
             WHERE id = ? AND is_deleted = 0",
        )
        .bind(order.car_id)
        .bind(order.driver_id)
        .bind(&order.passenger_name)
        .bind(&order.pickup_address)
        .bind(&order.dropoff_address)
        .bind(status_str)
        .bind(&order.completed_at)
        .bind(order.id)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::Database {
            message: e.to_string(),
        })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", order.id));
        }

        Ok(())
    }

    async fn delete(&self, id: Id) -> DbResult<()> {
        let result =
            sqlx::query("UPDATE orders SET is_deleted = 1 WHERE id = ? AND is_deleted = 0")
                .bind(id)
                .execute(self.pool)
                .await
                .map_err(|e| DbError::Database {
                    message: e.to_string(),
                })?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }
}
