//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for data access,
//! allowing different storage backends (SQLite, PostgreSQL, in-memory, etc.)
//! to be swapped without changing business logic.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Driver, Manufacturer, Car, Order)
//! - `repository`: Trait definitions for data access
//! - `sqlite`: sqlx-backed SQLite implementation

mod error;
mod models;
mod repository;
mod sqlite;
pub mod utils;


pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
