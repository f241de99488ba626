//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic. All
//! methods return `Send` futures so handlers generic over [`Database`]
//! can run on the multithreaded runtime.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Car, Driver, Id, ListQuery, ListResult, Manufacturer, Order},
};

/// Repository for Driver operations.
pub trait DriverRepository {
    /// Create a new driver, returning it with the generated id.
    /// The id of the input is ignored; timestamps are generated.
    fn create(&self, driver: &Driver) -> impl Future<Output = DbResult<Driver>> + Send;

    /// Get a non-deleted driver by id.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<Driver>> + Send;

    /// Find a non-deleted driver by login.
    fn find_by_login(&self, login: &str) -> impl Future<Output = DbResult<Option<Driver>>> + Send;

    /// List non-deleted drivers.
    fn list(
        &self,
        query: Option<&ListQuery>,
    ) -> impl Future<Output = DbResult<ListResult<Driver>>> + Send;

    /// Update an existing driver (full row).
    fn update(&self, driver: &Driver) -> impl Future<Output = DbResult<()>> + Send;

    /// Soft-delete a driver by id.
    fn delete(&self, id: Id) -> impl Future<Output = DbResult<()>> + Send;
}

/// Repository for Manufacturer operations.
pub trait ManufacturerRepository {
    /// Create a new manufacturer, returning it with the generated id.
    fn create(
        &self,
        manufacturer: &Manufacturer,
    ) -> impl Future<Output = DbResult<Manufacturer>> + Send;

    /// Get a non-deleted manufacturer by id.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<Manufacturer>> + Send;

    /// List non-deleted manufacturers.
    fn list(
        &self,
        query: Option<&ListQuery>,
    ) -> impl Future<Output = DbResult<ListResult<Manufacturer>>> + Send;

    /// Update an existing manufacturer (full row).
    fn update(&self, manufacturer: &Manufacturer) -> impl Future<Output = DbResult<()>> + Send;

    /// Soft-delete a manufacturer by id.
    fn delete(&self, id: Id) -> impl Future<Output = DbResult<()>> + Send;
}

/// Repository for Car operations.
pub trait CarRepository {
    /// Create a new car along with its driver links, returning it with
    /// the generated id.
    fn create(&self, car: &Car) -> impl Future<Output = DbResult<Car>> + Send;

    /// Get a non-deleted car by id, with its assigned driver ids.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<Car>> + Send;

    /// List non-deleted cars.
    fn list(
        &self,
        query: Option<&ListQuery>,
    ) -> impl Future<Output = DbResult<ListResult<Car>>> + Send;

    /// List non-deleted cars assigned to a driver.
    fn list_by_driver(&self, driver_id: Id) -> impl Future<Output = DbResult<Vec<Car>>> + Send;

    /// Update an existing car; the driver link set is replaced with
    /// `car.driver_ids`.
    fn update(&self, car: &Car) -> impl Future<Output = DbResult<()>> + Send;

    /// Soft-delete a car by id.
    fn delete(&self, id: Id) -> impl Future<Output = DbResult<()>> + Send;

    /// Assign a driver to a car.
    fn add_driver(&self, car_id: Id, driver_id: Id) -> impl Future<Output = DbResult<()>> + Send;

    /// Unassign a driver from a car.
    fn remove_driver(&self, car_id: Id, driver_id: Id)
    -> impl Future<Output = DbResult<()>> + Send;
}

/// Repository for Order operations.
pub trait OrderRepository {
    /// Create a new order, returning it with the generated id.
    fn create(&self, order: &Order) -> impl Future<Output = DbResult<Order>> + Send;

    /// Get a non-deleted order by id.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<Order>> + Send;

    /// List non-deleted orders.
    fn list(
        &self,
        query: Option<&ListQuery>,
    ) -> impl Future<Output = DbResult<ListResult<Order>>> + Send;

    /// List non-deleted orders served by a driver.
    fn list_by_driver(&self, driver_id: Id) -> impl Future<Output = DbResult<Vec<Order>>> + Send;

    /// Update an existing order (full row).
    fn update(&self, order: &Order) -> impl Future<Output = DbResult<()>> + Send;

    /// Soft-delete an order by id.
    fn delete(&self, id: Id) -> impl Future<Output = DbResult<()>> + Send;
}

/// Combined database interface.
///
/// This is the composition seam: the HTTP and service layers are generic
/// over `D: Database`, and the concrete backend is chosen once in the
/// server binary.
pub trait Database: Send + Sync {
    type Drivers<'a>: DriverRepository + Send + Sync
    where
        Self: 'a;
    type Manufacturers<'a>: ManufacturerRepository + Send + Sync
    where
        Self: 'a;
    type Cars<'a>: CarRepository + Send + Sync
    where
        Self: 'a;
    type Orders<'a>: OrderRepository + Send + Sync
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the driver repository.
    fn drivers(&self) -> Self::Drivers<'_>;

    /// Get the manufacturer repository.
    fn manufacturers(&self) -> Self::Manufacturers<'_>;

    /// Get the car repository.
    fn cars(&self) -> Self::Cars<'_>;

    /// Get the order repository.
    fn orders(&self) -> Self::Orders<'_>;
}
