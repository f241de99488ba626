//! Tests for AuthService.

use crate::db::{Database, DriverRepository, SqliteDatabase};
use crate::service::{AuthService, DriverService, NewDriver, ServiceError};

const LOGIN: &str = "alice";
const PASSWORD: &str = "1234";

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");

    DriverService::new(&db)
        .register(&NewDriver {
            name: "Alice".to_string(),
            license_number: "FK2569".to_string(),
            login: LOGIN.to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .expect("Registration should succeed");

    db
}

#[tokio::test(flavor = "multi_thread")]
async fn login_ok() {
    let db = setup_db().await;

    let driver = AuthService::new(&db)
        .login(LOGIN, PASSWORD)
        .await
        .expect("Login or password was incorrect");
    assert_eq!(driver.login, LOGIN);
}

#[tokio::test(flavor = "multi_thread")]
async fn login_blank_login_fails() {
    let db = setup_db().await;

    let result = AuthService::new(&db).login("", PASSWORD).await;
    assert!(matches!(result, Err(ServiceError::Authentication)));

    let result = AuthService::new(&db).login("   ", PASSWORD).await;
    assert!(matches!(result, Err(ServiceError::Authentication)));
}

#[tokio::test(flavor = "multi_thread")]
async fn login_empty_password_fails() {
    let db = setup_db().await;

    let result = AuthService::new(&db).login(LOGIN, "").await;
    assert!(matches!(result, Err(ServiceError::Authentication)));
}

#[tokio::test(flavor = "multi_thread")]
async fn login_unknown_login_fails() {
    let db = setup_db().await;

    let result = AuthService::new(&db).login("Invalid", PASSWORD).await;
    assert!(matches!(result, Err(ServiceError::Authentication)));
}

#[tokio::test(flavor = "multi_thread")]
async fn login_wrong_password_fails() {
    let db = setup_db().await;

    let result = AuthService::new(&db).login(LOGIN, "wrong").await;
    assert!(matches!(result, Err(ServiceError::Authentication)));
}

#[tokio::test(flavor = "multi_thread")]
async fn login_deleted_driver_fails() {
    let db = setup_db().await;

    let driver = db
        .drivers()
        .find_by_login(LOGIN)
        .await
        .expect("Find should succeed")
        .expect("Driver should exist");
    db.drivers()
        .delete(driver.id)
        .await
        .expect("Delete should succeed");

    let result = AuthService::new(&db).login(LOGIN, PASSWORD).await;
    assert!(matches!(result, Err(ServiceError::Authentication)));
}
