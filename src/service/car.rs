//! Car and driver-assignment management.

use crate::db::{
    Car, CarRepository, Database, DriverRepository, Id, ListQuery, ListResult,
    ManufacturerRepository,
};

use super::error::{ServiceError, ServiceResult};
use super::{MSG_EMPTY_ENTRY, is_blank};

/// Car CRUD plus driver assignment.
pub struct CarService<'a, D: Database> {
    db: &'a D,
}

impl<'a, D: Database> CarService<'a, D> {
    pub fn new(db: &'a D) -> Self {
        Self { db }
    }

    /// Create a car. The manufacturer and every listed driver must exist.
    pub async fn create(
        &self,
        model: &str,
        manufacturer_id: Id,
        driver_ids: &[Id],
    ) -> ServiceResult<Car> {
        if is_blank(model) {
            return Err(ServiceError::validation(MSG_EMPTY_ENTRY));
        }

        self.db.manufacturers().get(manufacturer_id).await?;
        for &driver_id in driver_ids {
            self.db.drivers().get(driver_id).await?;
        }

        let car = Car {
            id: 0,
            model: model.to_string(),
            manufacturer_id,
            driver_ids: driver_ids.to_vec(),
            created_at: String::new(),
            updated_at: String::new(),
        };

        Ok(self.db.cars().create(&car).await?)
    }

    pub async fn get(&self, id: Id) -> ServiceResult<Car> {
        Ok(self.db.cars().get(id).await?)
    }

    pub async fn list(&self, query: Option<&ListQuery>) -> ServiceResult<ListResult<Car>> {
        Ok(self.db.cars().list(query).await?)
    }

    /// Cars currently assigned to the given driver.
    pub async fn list_by_driver(&self, driver_id: Id) -> ServiceResult<Vec<Car>> {
        self.db.drivers().get(driver_id).await?;
        Ok(self.db.cars().list_by_driver(driver_id).await?)
    }

    /// Update a car; the driver link set is replaced with `driver_ids`.
    pub async fn update(
        &self,
        id: Id,
        model: &str,
        manufacturer_id: Id,
        driver_ids: &[Id],
    ) -> ServiceResult<Car> {
        if is_blank(model) {
            return Err(ServiceError::validation(MSG_EMPTY_ENTRY));
        }

        self.db.manufacturers().get(manufacturer_id).await?;
        for &driver_id in driver_ids {
            self.db.drivers().get(driver_id).await?;
        }

        let mut car = self.db.cars().get(id).await?;
        car.model = model.to_string();
        car.manufacturer_id = manufacturer_id;
        car.driver_ids = driver_ids.to_vec();

        self.db.cars().update(&car).await?;
        Ok(self.db.cars().get(id).await?)
    }

    pub async fn delete(&self, id: Id) -> ServiceResult<()> {
        Ok(self.db.cars().delete(id).await?)
    }

    pub async fn add_driver(&self, car_id: Id, driver_id: Id) -> ServiceResult<Car> {
        self.db.cars().add_driver(car_id, driver_id).await?;
        Ok(self.db.cars().get(car_id).await?)
    }

    pub async fn remove_driver(&self, car_id: Id, driver_id: Id) -> ServiceResult<Car> {
        self.db.cars().remove_driver(car_id, driver_id).await?;
        Ok(self.db.cars().get(car_id).await?)
    }
}
