//! Tests for OrderService.

use crate::db::{Database, DbError, Id, OrderStatus, SqliteDatabase};
use crate::service::{
    CarService, DriverService, ManufacturerService, NewDriver, NewOrder, OrderService,
    ServiceError,
};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

/// Create a manufacturer, a driver and a car; return (car_id, driver_id).
async fn setup_fleet(db: &SqliteDatabase) -> (Id, Id) {
    let manufacturer = ManufacturerService::new(db)
        .create("Toyota", "Japan")
        .await
        .expect("Create manufacturer should succeed");

    let driver = DriverService::new(db)
        .register(&NewDriver {
            name: "Alice".to_string(),
            license_number: "FK2569".to_string(),
            login: "alice".to_string(),
            password: "1234".to_string(),
        })
        .await
        .expect("Registration should succeed");

    let car = CarService::new(db)
        .create("Corolla", manufacturer.id, &[driver.id])
        .await
        .expect("Create car should succeed");

    (car.id, driver.id)
}

fn new_order(car_id: Id, driver_id: Id) -> NewOrder {
    NewOrder {
        car_id,
        driver_id,
        passenger_name: "Bob".to_string(),
        pickup_address: "1 Main St".to_string(),
        dropoff_address: "42 Elm St".to_string(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn create_order_starts_open() {
    let db = setup_db().await;
    let (car_id, driver_id) = setup_fleet(&db).await;

    let order = OrderService::new(&db)
        .create(&new_order(car_id, driver_id))
        .await
        .expect("Create should succeed");
    assert_eq!(order.status, OrderStatus::Open);
    assert_eq!(order.completed_at, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_order_unknown_car_fails() {
    let db = setup_db().await;
    let (_, driver_id) = setup_fleet(&db).await;

    let result = OrderService::new(&db).create(&new_order(99, driver_id)).await;
    assert!(matches!(
        result,
        Err(ServiceError::Db(DbError::NotFound { .. }))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_order_blank_passenger_fails() {
    let db = setup_db().await;
    let (car_id, driver_id) = setup_fleet(&db).await;

    let mut order = new_order(car_id, driver_id);
    order.passenger_name = "  ".to_string();

    let result = OrderService::new(&db).create(&order).await;
    assert!(matches!(result, Err(ServiceError::Validation { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn complete_order_stamps_completed_at() {
    let db = setup_db().await;
    let (car_id, driver_id) = setup_fleet(&db).await;
    let service = OrderService::new(&db);

    let order = service
        .create(&new_order(car_id, driver_id))
        .await
        .expect("Create should succeed");

    let completed = service
        .complete(order.id)
        .await
        .expect("Complete should succeed");
    assert_eq!(completed.status, OrderStatus::Completed);
    assert!(completed.completed_at.is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn complete_order_twice_fails() {
    let db = setup_db().await;
    let (car_id, driver_id) = setup_fleet(&db).await;
    let service = OrderService::new(&db);

    let order = service
        .create(&new_order(car_id, driver_id))
        .await
        .expect("Create should succeed");
    service
        .complete(order.id)
        .await
        .expect("Complete should succeed");

    let result = service.complete(order.id).await;
    assert!(matches!(result, Err(ServiceError::Validation { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn complete_cancelled_order_fails() {
    let db = setup_db().await;
    let (car_id, driver_id) = setup_fleet(&db).await;
    let service = OrderService::new(&db);

    let order = service
        .create(&new_order(car_id, driver_id))
        .await
        .expect("Create should succeed");
    service
        .update(
            order.id,
            "Bob",
            "1 Main St",
            "42 Elm St",
            OrderStatus::Cancelled,
        )
        .await
        .expect("Update should succeed");

    let result = service.complete(order.id).await;
    assert!(matches!(result, Err(ServiceError::Validation { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_by_driver_returns_only_their_orders() {
    let db = setup_db().await;
    let (car_id, driver_id) = setup_fleet(&db).await;
    let service = OrderService::new(&db);

    let carol = DriverService::new(&db)
        .register(&NewDriver {
            name: "Carol".to_string(),
            license_number: "XY1111".to_string(),
            login: "carol".to_string(),
            password: "1234".to_string(),
        })
        .await
        .expect("Registration should succeed");

    service
        .create(&new_order(car_id, driver_id))
        .await
        .expect("Create should succeed");
    service
        .create(&new_order(car_id, carol.id))
        .await
        .expect("Create should succeed");

    let orders = service
        .list_by_driver(driver_id)
        .await
        .expect("List by driver should succeed");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].driver_id, driver_id);
}
