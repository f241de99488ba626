//! SQLite implementation of the database traits.
//!
//! This module provides a SQLite-backed implementation of the repository
//! traits defined in the parent module.

mod car;
mod connection;
mod driver;
mod helpers;
mod manufacturer;
mod order;

#[cfg(test)]
mod car_test;
#[cfg(test)]
mod connection_test;

pub use car::SqliteCarRepository;
pub use connection::SqliteDatabase;
pub use driver::SqliteDriverRepository;
pub use manufacturer::SqliteManufacturerRepository;
pub use order::SqliteOrderRepository;
