//! Dispatch-order management.

use crate::db::utils::current_timestamp;
use crate::db::{
    CarRepository, Database, DriverRepository, Id, ListQuery, ListResult, Order, OrderRepository,
    OrderStatus,
};

use super::error::{ServiceError, ServiceResult};
use super::{MSG_EMPTY_ENTRY, is_blank};

/// Input for order creation.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub car_id: Id,
    pub driver_id: Id,
    pub passenger_name: String,
    pub pickup_address: String,
    pub dropoff_address: String,
}

/// Order CRUD and status transitions.
pub struct OrderService<'a, D: Database> {
    db: &'a D,
}

impl<'a, D: Database> OrderService<'a, D> {
    pub fn new(db: &'a D) -> Self {
        Self { db }
    }

    /// Create an order in `Open` state. The car and driver must exist.
    pub async fn create(&self, new_order: &NewOrder) -> ServiceResult<Order> {
        if is_blank(&new_order.passenger_name)
            || is_blank(&new_order.pickup_address)
            || is_blank(&new_order.dropoff_address)
        {
            return Err(ServiceError::validation(MSG_EMPTY_ENTRY));
        }

        self.db.cars().get(new_order.car_id).await?;
        self.db.drivers().get(new_order.driver_id).await?;

        let order = Order {
            id: 0,
            car_id: new_order.car_id,
            driver_id: new_order.driver_id,
            passenger_name: new_order.passenger_name.clone(),
            pickup_address: new_order.pickup_address.clone(),
            dropoff_address: new_order.dropoff_address.clone(),
            status: OrderStatus::Open,
            created_at: String::new(),
            completed_at: None,
        };

        Ok(self.db.orders().create(&order).await?)
    }

    pub async fn get(&self, id: Id) -> ServiceResult<Order> {
        Ok(self.db.orders().get(id).await?)
    }

    pub async fn list(&self, query: Option<&ListQuery>) -> ServiceResult<ListResult<Order>> {
        Ok(self.db.orders().list(query).await?)
    }

    /// Orders served by the given driver.
    pub async fn list_by_driver(&self, driver_id: Id) -> ServiceResult<Vec<Order>> {
        self.db.drivers().get(driver_id).await?;
        Ok(self.db.orders().list_by_driver(driver_id).await?)
    }

    /// Update passenger and route details and the status of an order.
    /// `completed_at` is managed by [`complete`](Self::complete), not here.
    pub async fn update(
        &self,
        id: Id,
        passenger_name: &str,
        pickup_address: &str,
        dropoff_address: &str,
        status: OrderStatus,
    ) -> ServiceResult<Order> {
        if is_blank(passenger_name) || is_blank(pickup_address) || is_blank(dropoff_address) {
            return Err(ServiceError::validation(MSG_EMPTY_ENTRY));
        }

        let mut order = self.db.orders().get(id).await?;
        order.passenger_name = passenger_name.to_string();
        order.pickup_address = pickup_address.to_string();
        order.dropoff_address = dropoff_address.to_string();
        order.status = status;

        self.db.orders().update(&order).await?;
        Ok(self.db.orders().get(id).await?)
    }

    /// Transition an order to `Completed`, stamping `completed_at`.
    /// Completed and cancelled orders cannot be completed again.
    pub async fn complete(&self, id: Id) -> ServiceResult<Order> {
        let mut order = self.db.orders().get(id).await?;

        match order.status {
            OrderStatus::Open | OrderStatus::InProgress => {}
            OrderStatus::Completed => {
                return Err(ServiceError::validation("Order is already completed"));
            }
            OrderStatus::Cancelled => {
                return Err(ServiceError::validation("Cancelled order can't be completed"));
            }
        }

        order.status = OrderStatus::Completed;
        order.completed_at = Some(current_timestamp());

        self.db.orders().update(&order).await?;
        Ok(self.db.orders().get(id).await?)
    }

    pub async fn delete(&self, id: Id) -> ServiceResult<()> {
        Ok(self.db.orders().delete(id).await?)
    }
}
