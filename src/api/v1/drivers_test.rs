//! Integration tests for driver endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
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

async fn create_driver(app: &axum::Router, login: &str) -> i64 {
    let response = app
        .clone()
        .oneshot(request_json(
            "POST",
            "/api/v1/drivers",
            &json!({
                "name": login,
                "license_number": "FK2569",
                "login": login,
                "password": "1234"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await["id"].as_i64().unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn list_drivers_initially_empty() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/drivers")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
    assert_eq!(body["total"].as_u64().unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_and_get_driver() {
    let app = test_app().await;
    let id = create_driver(&app, "alice").await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/drivers/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["login"], "alice");
    assert_eq!(body["license_number"], "FK2569");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_driver_returns_not_found() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/drivers/404")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_driver_changes_license() {
    let app = test_app().await;
    let id = create_driver(&app, "alice").await;

    let response = app
        .clone()
        .oneshot(request_json(
            "PUT",
            &format!("/api/v1/drivers/{}", id),
            &json!({
                "name": "Alice",
                "license_number": "AD1234",
                "login": "alice"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["license_number"], "AD1234");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_driver_to_taken_login_returns_conflict() {
    let app = test_app().await;
    create_driver(&app, "alice").await;
    let bob = create_driver(&app, "bob").await;

    let response = app
        .oneshot(request_json(
            "PUT",
            &format!("/api/v1/drivers/{}", bob),
            &json!({
                "name": "Bob",
                "license_number": "FK2569",
                "login": "alice"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_driver_then_get_returns_not_found() {
    let app = test_app().await;
    let id = create_driver(&app, "alice").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/drivers/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/drivers/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn my_cars_requires_login() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/drivers/me/cars")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn my_cars_returns_assigned_cars() {
    let app = test_app().await;
    let driver_id = create_driver(&app, "alice").await;

    // log in
    let response = app
        .clone()
        .oneshot(request_json(
            "POST",
            "/api/v1/auth/login",
            &json!({"login": "alice", "password": "1234"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    // create a manufacturer and a car assigned to alice
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
            "/api/v1/cars",
            &json!({
                "model": "Corolla",
                "manufacturer_id": manufacturer_id,
                "driver_ids": [driver_id]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/drivers/me/cars")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let cars = body.as_array().unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0]["model"], "Corolla");
}
