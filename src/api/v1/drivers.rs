//! Driver management handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;
use utoipa::ToSchema;

use super::cars::CarResponse;
use super::{ErrorReply, ErrorResponse, ListParams, error_response, require_driver};
use crate::api::AppState;
use crate::db::{Database, Driver, Id};
use crate::service::{CarService, DriverService, NewDriver};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Driver response DTO. The password digest never leaves the server.
#[derive(Serialize, ToSchema)]
pub struct DriverResponse {
    /// Unique identifier
    #[schema(example = 1)]
    pub id: Id,
    /// Driver display name
    #[schema(example = "Alice")]
    pub name: String,
    /// Driving license number
    #[schema(example = "FK2569")]
    pub license_number: String,
    /// Unique login
    #[schema(example = "alice")]
    pub login: String,
    /// Creation timestamp
    #[schema(example = "2025-01-01 00:00:00")]
    pub created_at: String,
    /// Last update timestamp
    #[schema(example = "2025-01-01 00:00:00")]
    pub updated_at: String,
}

impl From<Driver> for DriverResponse {
    fn from(d: Driver) -> Self {
        Self {
            id: d.id,
            name: d.name,
            license_number: d.license_number,
            login: d.login,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

/// Create driver request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDriverRequest {
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "FK2569")]
    pub license_number: String,
    #[schema(example = "alice")]
    pub login: String,
    #[schema(example = "1234")]
    pub password: String,
}

/// Update driver request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDriverRequest {
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "AD1234")]
    pub license_number: String,
    #[schema(example = "alice")]
    pub login: String,
    /// New clear password; omit to keep the current one
    pub password: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedDrivers {
    pub items: Vec<DriverResponse>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

// =============================================================================
// Handlers
// =============================================================================

/// List all drivers
///
/// Returns a paginated list of non-deleted drivers
#[utoipa::path(
    get,
    path = "/api/v1/drivers",
    tag = "drivers",
    params(ListParams),
    responses(
        (status = 200, description = "Paginated list of drivers", body = PaginatedDrivers),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_drivers<D: Database>(
    State(state): State<AppState<D>>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedDrivers>, ErrorReply> {
    let result = DriverService::new(state.db())
        .list(Some(&params.to_query()))
        .await
        .map_err(error_response)?;

    Ok(Json(PaginatedDrivers {
        items: result.items.into_iter().map(DriverResponse::from).collect(),
        total: result.total,
        limit: result.limit.unwrap_or(50),
        offset: result.offset,
    }))
}

/// Get a driver by id
#[utoipa::path(
    get,
    path = "/api/v1/drivers/{id}",
    tag = "drivers",
    params(
        ("id" = i64, Path, description = "Driver id")
    ),
    responses(
        (status = 200, description = "Driver found", body = DriverResponse),
        (status = 404, description = "Driver not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_driver<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
) -> Result<Json<DriverResponse>, ErrorReply> {
    let driver = DriverService::new(state.db())
        .get(id)
        .await
        .map_err(error_response)?;

    Ok(Json(DriverResponse::from(driver)))
}

/// Create a new driver
///
/// Same rules as registration: all fields required, unique login
#[utoipa::path(
    post,
    path = "/api/v1/drivers",
    tag = "drivers",
    request_body = CreateDriverRequest,
    responses(
        (status = 201, description = "Driver created", body = DriverResponse),
        (status = 400, description = "Missing or blank fields", body = ErrorResponse),
        (status = 409, description = "Login already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, req))]
pub async fn create_driver<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<CreateDriverRequest>,
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

/// Update a driver
#[utoipa::path(
    put,
    path = "/api/v1/drivers/{id}",
    tag = "drivers",
    params(
        ("id" = i64, Path, description = "Driver id")
    ),
    request_body = UpdateDriverRequest,
    responses(
        (status = 200, description = "Driver updated", body = DriverResponse),
        (status = 400, description = "Missing or blank fields", body = ErrorResponse),
        (status = 404, description = "Driver not found", body = ErrorResponse),
        (status = 409, description = "Login already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, req))]
pub async fn update_driver<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
    Json(req): Json<UpdateDriverRequest>,
) -> Result<Json<DriverResponse>, ErrorReply> {
    let driver = DriverService::new(state.db())
        .update(
            id,
            &req.name,
            &req.license_number,
            &req.login,
            req.password.as_deref(),
        )
        .await
        .map_err(error_response)?;

    Ok(Json(DriverResponse::from(driver)))
}

/// Delete a driver
///
/// Soft-deletes the driver; it disappears from all read paths
#[utoipa::path(
    delete,
    path = "/api/v1/drivers/{id}",
    tag = "drivers",
    params(
        ("id" = i64, Path, description = "Driver id")
    ),
    responses(
        (status = 204, description = "Driver deleted"),
        (status = 404, description = "Driver not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_driver<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
) -> Result<StatusCode, ErrorReply> {
    DriverService::new(state.db())
        .delete(id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Cars of the logged-in driver
#[utoipa::path(
    get,
    path = "/api/v1/drivers/me/cars",
    tag = "drivers",
    responses(
        (status = 200, description = "Cars assigned to the logged-in driver", body = [CarResponse]),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, session))]
pub async fn my_cars<D: Database>(
    State(state): State<AppState<D>>,
    session: Session,
) -> Result<Json<Vec<CarResponse>>, ErrorReply> {
    let driver = require_driver(&state, &session).await?;

    let cars = CarService::new(state.db())
        .list_by_driver(driver.id)
        .await
        .map_err(error_response)?;

    Ok(Json(cars.into_iter().map(CarResponse::from).collect()))
}
