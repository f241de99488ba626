//! Domain models for the dispatch database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use serde::{Deserialize, Serialize};

// =============================================================================
// Query Types for Pagination and Sorting
// =============================================================================

/// Sort order for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Pagination and sorting options shared by all list operations.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Maximum number of items to return.
    pub limit: Option<usize>,
    /// Number of items to skip.
    pub offset: Option<usize>,
    /// Field to sort by (validated per entity type).
    pub sort_by: Option<String>,
    /// Sort order (ascending or descending).
    pub sort_order: Option<SortOrder>,
}

/// Result of a paginated list query.
#[derive(Debug, Clone)]
pub struct ListResult<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total count of all matching items (before pagination).
    pub total: usize,
    /// Limit that was applied.
    pub limit: Option<usize>,
    /// Offset that was applied.
    pub offset: usize,
}

// =============================================================================
// Entities
// =============================================================================

/// Database-generated entity id.
pub type Id = i64;

/// A driver who can be assigned to cars and serve orders.
///
/// `password_hash` is a SHA-256 hex digest; the clear password never
/// reaches the database layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub id: Id,
    pub name: String,
    pub license_number: String,
    pub login: String,
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A car manufacturer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: Id,
    pub name: String,
    pub country: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A car in the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: Id,
    pub model: String,
    pub manufacturer_id: Id,
    /// Assigned driver ids (M:N relationship via cars_drivers).
    #[serde(default)]
    pub driver_ids: Vec<Id>,
    pub created_at: String,
    pub updated_at: String,
}

/// A dispatch order: one passenger trip served by a car and a driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: Id,
    pub car_id: Id,
    pub driver_id: Id,
    pub passenger_name: String,
    pub pickup_address: String,
    pub dropoff_address: String,
    pub status: OrderStatus,
    pub created_at: String,
    pub completed_at: Option<String>,
}

/// Status of a dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Open => write!(f, "open"),
            OrderStatus::InProgress => write!(f, "in_progress"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(OrderStatus::Open),
            "in_progress" => Ok(OrderStatus::InProgress),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}
