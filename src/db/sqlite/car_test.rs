//! Tests for SqliteCarRepository.

use crate::db::{
    Car, CarRepository, Database, DbError, Driver, DriverRepository, Id, Manufacturer,
    ManufacturerRepository, SqliteDatabase,
};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

async fn create_manufacturer(db: &SqliteDatabase) -> Id {
    db.manufacturers()
        .create(&Manufacturer {
            id: 0,
            name: "Toyota".to_string(),
            country: "Japan".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        })
        .await
        .expect("Create manufacturer should succeed")
        .id
}

async fn create_driver(db: &SqliteDatabase, login: &str) -> Id {
    db.drivers()
        .create(&Driver {
            id: 0,
            name: login.to_string(),
            license_number: "FK2569".to_string(),
            login: login.to_string(),
            password_hash: "digest".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        })
        .await
        .expect("Create driver should succeed")
        .id
}

fn sample_car(manufacturer_id: Id, driver_ids: Vec<Id>) -> Car {
    Car {
        id: 0,
        model: "Corolla".to_string(),
        manufacturer_id,
        driver_ids,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn create_car_with_drivers_and_get() {
    let db = setup_db().await;
    let manufacturer_id = create_manufacturer(&db).await;
    let alice = create_driver(&db, "alice").await;
    let bob = create_driver(&db, "bob").await;

    let created = db
        .cars()
        .create(&sample_car(manufacturer_id, vec![alice, bob]))
        .await
        .expect("Create should succeed");

    let retrieved = db.cars().get(created.id).await.expect("Get should succeed");
    assert_eq!(retrieved.model, "Corolla");
    assert_eq!(retrieved.manufacturer_id, manufacturer_id);
    assert_eq!(retrieved.driver_ids, vec![alice, bob]);
}

#[tokio::test(flavor = "multi_thread")]
async fn add_and_remove_driver() {
    let db = setup_db().await;
    let manufacturer_id = create_manufacturer(&db).await;
    let alice = create_driver(&db, "alice").await;

    let car = db
        .cars()
        .create(&sample_car(manufacturer_id, vec![]))
        .await
        .expect("Create should succeed");

    db.cars()
        .add_driver(car.id, alice)
        .await
        .expect("Add driver should succeed");
    assert_eq!(
        db.cars().get(car.id).await.expect("Get should succeed").driver_ids,
        vec![alice]
    );

    // Adding the same driver twice is a no-op
    db.cars()
        .add_driver(car.id, alice)
        .await
        .expect("Re-add should succeed");
    assert_eq!(
        db.cars().get(car.id).await.expect("Get should succeed").driver_ids,
        vec![alice]
    );

    db.cars()
        .remove_driver(car.id, alice)
        .await
        .expect("Remove driver should succeed");
    assert!(
        db.cars()
            .get(car.id)
            .await
            .expect("Get should succeed")
            .driver_ids
            .is_empty()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn add_driver_to_unknown_car_returns_not_found() {
    let db = setup_db().await;
    let alice = create_driver(&db, "alice").await;

    let result = db.cars().add_driver(777, alice).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn add_unknown_driver_returns_not_found() {
    let db = setup_db().await;
    let manufacturer_id = create_manufacturer(&db).await;
    let car = db
        .cars()
        .create(&sample_car(manufacturer_id, vec![]))
        .await
        .expect("Create should succeed");

    let result = db.cars().add_driver(car.id, 777).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_by_driver_returns_assigned_cars_only() {
    let db = setup_db().await;
    let manufacturer_id = create_manufacturer(&db).await;
    let alice = create_driver(&db, "alice").await;
    let bob = create_driver(&db, "bob").await;

    let assigned = db
        .cars()
        .create(&sample_car(manufacturer_id, vec![alice]))
        .await
        .expect("Create should succeed");
    db.cars()
        .create(&sample_car(manufacturer_id, vec![bob]))
        .await
        .expect("Create should succeed");

    let cars = db
        .cars()
        .list_by_driver(alice)
        .await
        .expect("List by driver should succeed");
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].id, assigned.id);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_driver_links() {
    let db = setup_db().await;
    let manufacturer_id = create_manufacturer(&db).await;
    let alice = create_driver(&db, "alice").await;
    let bob = create_driver(&db, "bob").await;

    let mut car = db
        .cars()
        .create(&sample_car(manufacturer_id, vec![alice]))
        .await
        .expect("Create should succeed");

    car.model = "Camry".to_string();
    car.driver_ids = vec![bob];
    db.cars().update(&car).await.expect("Update should succeed");

    let retrieved = db.cars().get(car.id).await.expect("Get should succeed");
    assert_eq!(retrieved.model, "Camry");
    assert_eq!(retrieved.driver_ids, vec![bob]);
}

#[tokio::test(flavor = "multi_thread")]
async fn deleted_driver_disappears_from_car() {
    let db = setup_db().await;
    let manufacturer_id = create_manufacturer(&db).await;
    let alice = create_driver(&db, "alice").await;

    let car = db
        .cars()
        .create(&sample_car(manufacturer_id, vec![alice]))
        .await
        .expect("Create should succeed");

    db.drivers()
        .delete(alice)
        .await
        .expect("Delete driver should succeed");

    let retrieved = db.cars().get(car.id).await.expect("Get should succeed");
    assert!(retrieved.driver_ids.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn soft_delete_hides_car() {
    let db = setup_db().await;
    let manufacturer_id = create_manufacturer(&db).await;
    let alice = create_driver(&db, "alice").await;

    let car = db
        .cars()
        .create(&sample_car(manufacturer_id, vec![alice]))
        .await
        .expect("Create should succeed");

    db.cars().delete(car.id).await.expect("Delete should succeed");

    assert!(matches!(
        db.cars().get(car.id).await,
        Err(DbError::NotFound { .. })
    ));
    assert!(
        db.cars()
            .list_by_driver(alice)
            .await
            .expect("List by driver should succeed")
            .is_empty()
    );
    let result = db.cars().list(None).await.expect("List should succeed");
    assert_eq!(result.total, 0);
}
