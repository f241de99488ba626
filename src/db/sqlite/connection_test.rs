//! Tests for SqliteDatabase connection management.

use crate::db::{Database, Driver, DriverRepository, SqliteDatabase};

#[tokio::test(flavor = "multi_thread")]
async fn in_memory_database_migrates() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
}

#[tokio::test(flavor = "multi_thread")]
async fn migrate_is_idempotent() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("First run should succeed");
    db.migrate().await.expect("Second run should succeed");
}

#[tokio::test(flavor = "multi_thread")]
async fn open_creates_database_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("dispatch.db");

    let db = SqliteDatabase::open(&path)
        .await
        .expect("Open should succeed");
    db.migrate().await.expect("Migration should succeed");

    let driver = Driver {
        id: 0,
        name: "Alice".to_string(),
        license_number: "FK2569".to_string(),
        login: "alice".to_string(),
        password_hash: "digest".to_string(),
        created_at: String::new(),
        updated_at: String::new(),
    };
    db.drivers()
        .create(&driver)
        .await
        .expect("Create should succeed");

    assert!(path.exists());
}
