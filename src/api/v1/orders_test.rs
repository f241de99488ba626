//! Integration tests for order endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{AppState, routes};
use crate::db::{Database, SqliteDatabase};

/// Create a test app with an in-memory database
async fn test_app() -> axum::Router {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    routes::create_router(AppState::new(db))
}

/// Helper to parse JSON response body
async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn request_json(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Create a manufacturer, a driver and a car; returns (car_id, driver_id).
async fn setup_fleet(app: &axum::Router) -> (i64, i64) {
    let response = app
        .clone()
        .oneshot(request_json(
            "POST",
            "/api/v1/manufacturers",
            &json!({"name": "Toyota", "country": "Japan"}),
        ))
        .await
        .unwrap();
    let manufacturer_id = json_body(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request_json(
            "POST",
            "/api/v1/drivers",
            &json!({
                "name": "Alice",
                "license_number": "FK2569",
                "login": "alice",
                "password": "1234"
            }),
        ))
        .await
        .unwrap();
    let driver_id = json_body(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request_json(
            "POST",
            "/api/v1/cars",
            &json!({
                "model": "Corolla",
                "manufacturer_id": manufacturer_id,
                "driver_ids": [driver_id]
            }),
        ))
        .await
        .unwrap();
    let car_id = json_body(response).await["id"].as_i64().unwrap();

    (car_id, driver_id)
}

fn order_payload(car_id: i64, driver_id: i64) -> Value {
    json!({
        "car_id": car_id,
        "driver_id": driver_id,
        "passenger_name": "Bob",
        "pickup_address": "1 Main St",
        "dropoff_address": "42 Elm St"
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn create_order_starts_open() {
    let app = test_app().await;
    let (car_id, driver_id) = setup_fleet(&app).await;

    let response = app
        .oneshot(request_json(
            "POST",
            "/api/v1/orders",
            &order_payload(car_id, driver_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["status"], "open");
    assert!(body["completed_at"].is_null());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_order_unknown_car_returns_not_found() {
    let app = test_app().await;
    let (_, driver_id) = setup_fleet(&app).await;

    let response = app
        .oneshot(request_json(
            "POST",
            "/api/v1/orders",
            &order_payload(999, driver_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn complete_order_stamps_completed_at() {
    let app = test_app().await;
    let (car_id, driver_id) = setup_fleet(&app).await;

    let response = app
        .clone()
        .oneshot(request_json(
            "POST",
            "/api/v1/orders",
            &order_payload(car_id, driver_id),
        ))
        .await
        .unwrap();
    let order_id = json_body(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/orders/{}/complete", order_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "completed");
    assert!(body["completed_at"].is_string());

    // completing again is rejected
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/orders/{}/complete", order_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_order_with_unknown_status_returns_bad_request() {
    let app = test_app().await;
    let (car_id, driver_id) = setup_fleet(&app).await;

    let response = app
        .clone()
        .oneshot(request_json(
            "POST",
            "/api/v1/orders",
            &order_payload(car_id, driver_id),
        ))
        .await
        .unwrap();
    let order_id = json_body(response).await["id"].as_i64().unwrap();

    let response = app
        .oneshot(request_json(
            "PUT",
            &format!("/api/v1/orders/{}", order_id),
            &json!({
                "passenger_name": "Bob",
                "pickup_address": "1 Main St",
                "dropoff_address": "42 Elm St",
                "status": "lost"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_order_changes_status() {
    let app = test_app().await;
    let (car_id, driver_id) = setup_fleet(&app).await;

    let response = app
        .clone()
        .oneshot(request_json(
            "POST",
            "/api/v1/orders",
            &order_payload(car_id, driver_id),
        ))
        .await
        .unwrap();
    let order_id = json_body(response).await["id"].as_i64().unwrap();

    let response = app
        .oneshot(request_json(
            "PUT",
            &format!("/api/v1/orders/{}", order_id),
            &json!({
                "passenger_name": "Bob",
                "pickup_address": "1 Main St",
                "dropoff_address": "42 Elm St",
                "status": "in_progress"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "in_progress");
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_order_then_get_returns_not_found() {
    let app = test_app().await;
    let (car_id, driver_id) = setup_fleet(&app).await;

    let response = app
        .clone()
        .oneshot(request_json(
            "POST",
            "/api/v1/orders",
            &order_payload(car_id, driver_id),
        ))
        .await
        .unwrap();
    let order_id = json_body(response).await["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/orders/{}", order_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/orders/{}", order_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn health_endpoint_responds() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}
