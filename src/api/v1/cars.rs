//! Car management handlers, including driver assignment.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::{ErrorReply, ErrorResponse, ListParams, error_response};
use crate::api::AppState;
use crate::db::{Car, Database, Id};
use crate::service::CarService;

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Car response DTO
#[derive(Serialize, ToSchema)]
pub struct CarResponse {
    /// Unique identifier
    #[schema(example = 1)]
    pub id: Id,
    #[schema(example = "Corolla")]
    pub model: String,
    #[schema(example = 1)]
    pub manufacturer_id: Id,
    /// Assigned driver ids
    pub driver_ids: Vec<Id>,
    /// Creation timestamp
    #[schema(example = "2025-01-01 00:00:00")]
    pub created_at: String,
    /// Last update timestamp
    #[schema(example = "2025-01-01 00:00:00")]
    pub updated_at: String,
}

impl From<Car> for CarResponse {
    fn from(c: Car) -> Self {
        Self {
            id: c.id,
            model: c.model,
            manufacturer_id: c.manufacturer_id,
            driver_ids: c.driver_ids,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Create car request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCarRequest {
    #[schema(example = "Corolla")]
    pub model: String,
    #[schema(example = 1)]
    pub manufacturer_id: Id,
    /// Initial driver assignments
    #[serde(default)]
    pub driver_ids: Vec<Id>,
}

/// Update car request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCarRequest {
    #[schema(example = "Camry")]
    pub model: String,
    #[schema(example = 1)]
    pub manufacturer_id: Id,
    /// Replacement driver assignments
    #[serde(default)]
    pub driver_ids: Vec<Id>,
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedCars {
    pub items: Vec<CarResponse>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

// =============================================================================
// Handlers
// =============================================================================

/// List all cars
#[utoipa::path(
    get,
    path = "/api/v1/cars",
    tag = "cars",
    params(ListParams),
    responses(
        (status = 200, description = "Paginated list of cars", body = PaginatedCars),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_cars<D: Database>(
    State(state): State<AppState<D>>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedCars>, ErrorReply> {
    let result = CarService::new(state.db())
        .list(Some(&params.to_query()))
        .await
        .map_err(error_response)?;

    Ok(Json(PaginatedCars {
        items: result.items.into_iter().map(CarResponse::from).collect(),
        total: result.total,
        limit: result.limit.unwrap_or(50),
        offset: result.offset,
    }))
}

/// Get a car by id
#[utoipa::path(
    get,
    path = "/api/v1/cars/{id}",
    tag = "cars",
    params(
        ("id" = i64, Path, description = "Car id")
    ),
    responses(
        (status = 200, description = "Car found", body = CarResponse),
        (status = 404, description = "Car not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_car<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
) -> Result<Json<CarResponse>, ErrorReply> {
    let car = CarService::new(state.db())
        .get(id)
        .await
        .map_err(error_response)?;

    Ok(Json(CarResponse::from(car)))
}

/// Create a new car
///
/// The manufacturer and every listed driver must exist
#[utoipa::path(
    post,
    path = "/api/v1/cars",
    tag = "cars",
    request_body = CreateCarRequest,
    responses(
        (status = 201, description = "Car created", body = CarResponse),
        (status = 400, description = "Missing or blank fields", body = ErrorResponse),
        (status = 404, description = "Manufacturer or driver not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, req))]
pub async fn create_car<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<CreateCarRequest>,
) -> Result<(StatusCode, Json<CarResponse>), ErrorReply> {
    let car = CarService::new(state.db())
        .create(&req.model, req.manufacturer_id, &req.driver_ids)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(CarResponse::from(car))))
}

/// Update a car
///
/// Replaces the driver assignment set with `driver_ids`
#[utoipa::path(
    put,
    path = "/api/v1/cars/{id}",
    tag = "cars",
    params(
        ("id" = i64, Path, description = "Car id")
    ),
    request_body = UpdateCarRequest,
    responses(
        (status = 200, description = "Car updated", body = CarResponse),
        (status = 400, description = "Missing or blank fields", body = ErrorResponse),
        (status = 404, description = "Car, manufacturer or driver not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, req))]
pub async fn update_car<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
    Json(req): Json<UpdateCarRequest>,
) -> Result<Json<CarResponse>, ErrorReply> {
    let car = CarService::new(state.db())
        .update(id, &req.model, req.manufacturer_id, &req.driver_ids)
        .await
        .map_err(error_response)?;

    Ok(Json(CarResponse::from(car)))
}

/// Delete a car
#[utoipa::path(
    delete,
    path = "/api/v1/cars/{id}",
    tag = "cars",
    params(
        ("id" = i64, Path, description = "Car id")
    ),
    responses(
        (status = 204, description = "Car deleted"),
        (status = 404, description = "Car not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_car<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
) -> Result<StatusCode, ErrorReply> {
    CarService::new(state.db())
        .delete(id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Assign a driver to a car
#[utoipa::path(
    post,
    path = "/api/v1/cars/{id}/drivers/{driver_id}",
    tag = "cars",
    params(
        ("id" = i64, Path, description = "Car id"),
        ("driver_id" = i64, Path, description = "Driver id")
    ),
    responses(
        (status = 200, description = "Driver assigned", body = CarResponse),
        (status = 404, description = "Car or driver not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn add_driver_to_car<D: Database>(
    State(state): State<AppState<D>>,
    Path((id, driver_id)): Path<(Id, Id)>,
) -> Result<Json<CarResponse>, ErrorReply> {
    let car = CarService::new(state.db())
        .add_driver(id, driver_id)
        .await
        .map_err(error_response)?;

    Ok(Json(CarResponse::from(car)))
}

/// Unassign a driver from a car
#[utoipa::path(
    delete,
    path = "/api/v1/cars/{id}/drivers/{driver_id}",
    tag = "cars",
    params(
        ("id" = i64, Path, description = "Car id"),
        ("driver_id" = i64, Path, description = "Driver id")
    ),
    responses(
        (status = 200, description = "Driver unassigned", body = CarResponse),
        (status = 404, description = "Car not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn remove_driver_from_car<D: Database>(
    State(state): State<AppState<D>>,
    Path((id, driver_id)): Path<(Id, Id)>,
) -> Result<Json<CarResponse>, ErrorReply> {
    let car = CarService::new(state.db())
        .remove_driver(id, driver_id)
        .await
        .map_err(error_response)?;

    Ok(Json(CarResponse::from(car)))
}
