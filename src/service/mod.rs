//! Business-logic layer.
//!
//! Each service performs guard-clause validation and delegates to the
//! repository traits. Services are constructed per call with a borrowed
//! [`Database`](crate::db::Database); the concrete backend is injected at
//! the composition root.

mod auth;
mod car;
mod driver;
mod error;
mod manufacturer;
mod order;

#[cfg(test)]
mod auth_test;
#[cfg(test)]
mod order_test;

pub use auth::{AuthService, hash_password};
pub use car::CarService;
pub use driver::{DriverService, NewDriver};
pub use error::{ServiceError, ServiceResult};
pub use manufacturer::ManufacturerService;
pub use order::{NewOrder, OrderService};

/// Message used when a required field is missing or blank.
pub(crate) const MSG_EMPTY_ENTRY: &str = "Entry data can't be empty";
/// Message used when a registration login is already taken.
pub(crate) const MSG_LOGIN_TAKEN: &str = "Such login already exists. Please try another";

/// True when the value is empty or whitespace-only.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
