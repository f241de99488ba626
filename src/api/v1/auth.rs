//! Authentication handlers: register, login, logout, current driver.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use utoipa::ToSchema;

use super::drivers::DriverResponse;
use super::{ErrorReply, ErrorResponse, error_response, require_driver, session_error};
use crate::api::AppState;
use crate::api::session::AuthSession;
use crate::db::Database;
use crate::service::{AuthService, DriverService, NewDriver};

/// Registration request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Driver display name
    #[schema(example = "Alice")]
    pub name: String,
    /// Driving license number
    #[schema(example = "FK2569")]
    pub license_number: String,
    /// Unique login
    #[schema(example = "alice")]
    pub login: String,
    /// Clear password, stored as a digest
    #[schema(example = "1234")]
    pub password: String,
}

/// Login request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice")]
    pub login: String,
    #[schema(example = "1234")]
    pub password: String,
}

/// Register a new driver
///
/// Creates a driver account; the login must be unique
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Driver registered", body = DriverResponse),
        (status = 400, description = "Missing or blank fields", body = ErrorResponse),
        (status = 409, description = "Login already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, req))]
pub async fn register<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<DriverResponse>), ErrorReply> {
    let driver = DriverService::new(state.db())
        .register(&NewDriver {
            name: req.name,
            license_number: req.license_number,
            login: req.login,
            password: req.password,
        })
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(DriverResponse::from(driver))))
}

/// Log in
///
/// Verifies credentials and stores the driver id in the session
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = DriverResponse),
        (status = 401, description = "Login or password was incorrect", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, session, req))]
pub async fn login<D: Database>(
    State(state): State<AppState<D>>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> Result<Json<DriverResponse>, ErrorReply> {
    let driver = AuthService::new(state.db())
        .login(&req.login, &req.password)
        .await
        .map_err(error_response)?;

    AuthSession::new(&session)
        .set_driver_id(driver.id)
        .await
        .map_err(session_error)?;

    Ok(Json(DriverResponse::from(driver)))
}

/// Log out
///
/// Invalidates the session and redirects to the service root
#[utoipa::path(
    get,
    path = "/api/v1/auth/logout",
    tag = "auth",
    responses(
        (status = 303, description = "Session cleared, redirected to /"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect, ErrorReply> {
    AuthSession::new(&session)
        .clear()
        .await
        .map_err(session_error)?;

    Ok(Redirect::to("/"))
}

/// Current driver
///
/// Returns the driver stored in the session
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Logged-in driver", body = DriverResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, session))]
pub async fn me<D: Database>(
    State(state): State<AppState<D>>,
    session: Session,
) -> Result<Json<DriverResponse>, ErrorReply> {
    let driver = require_driver(&state, &session).await?;
    Ok(Json(DriverResponse::from(driver)))
}
