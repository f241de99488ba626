//! Manufacturer management handlers.

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
use crate::db::{Database, Id, Manufacturer};
use crate::service::ManufacturerService;

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Manufacturer response DTO
#[derive(Serialize, ToSchema)]
pub struct ManufacturerResponse {
    /// Unique identifier
    #[schema(example = 1)]
    pub id: Id,
    #[schema(example = "Toyota")]
    pub name: String,
    #[schema(example = "Japan")]
    pub country: String,
    /// Creation timestamp
    #[schema(example = "2025-01-01 00:00:00")]
    pub created_at: String,
    /// Last update timestamp
    #[schema(example = "2025-01-01 00:00:00")]
    pub updated_at: String,
}

impl From<Manufacturer> for ManufacturerResponse {
    fn from(m: Manufacturer) -> Self {
        Self {
            id: m.id,
            name: m.name,
            country: m.country,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Create manufacturer request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateManufacturerRequest {
    #[schema(example = "Toyota")]
    pub name: String,
    #[schema(example = "Japan")]
    pub country: String,
}

/// Update manufacturer request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateManufacturerRequest {
    #[schema(example = "Toyota")]
    pub name: String,
    #[schema(example = "Japan")]
    pub country: String,
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedManufacturers {
    pub items: Vec<ManufacturerResponse>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

// =============================================================================
// Handlers
// =============================================================================

/// List all manufacturers
#[utoipa::path(
    get,
    path = "/api/v1/manufacturers",
    tag = "manufacturers",
    params(ListParams),
    responses(
        (status = 200, description = "Paginated list of manufacturers", body = PaginatedManufacturers),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_manufacturers<D: Database>(
    State(state): State<AppState<D>>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedManufacturers>, ErrorReply> {
    let result = ManufacturerService::new(state.db())
        .list(Some(&params.to_query()))
        .await
        .map_err(error_response)?;

    Ok(Json(PaginatedManufacturers {
        items: result
            .items
            .into_iter()
            .map(ManufacturerResponse::from)
            .collect(),
        total: result.total,
        limit: result.limit.unwrap_or(50),
        offset: result.offset,
    }))
}

/// Get a manufacturer by id
#[utoipa::path(
    get,
    path = "/api/v1/manufacturers/{id}",
    tag = "manufacturers",
    params(
        ("id" = i64, Path, description = "Manufacturer id")
    ),
    responses(
        (status = 200, description = "Manufacturer found", body = ManufacturerResponse),
        (status = 404, description = "Manufacturer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_manufacturer<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
) -> Result<Json<ManufacturerResponse>, ErrorReply> {
    let manufacturer = ManufacturerService::new(state.db())
        .get(id)
        .await
        .map_err(error_response)?;

    Ok(Json(ManufacturerResponse::from(manufacturer)))
}

/// Create a new manufacturer
#[utoipa::path(
    post,
    path = "/api/v1/manufacturers",
    tag = "manufacturers",
    request_body = CreateManufacturerRequest,
    responses(
        (status = 201, description = "Manufacturer created", body = ManufacturerResponse),
        (status = 400, description = "Missing or blank fields", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, req))]
pub async fn create_manufacturer<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<CreateManufacturerRequest>,
) -> Result<(StatusCode, Json<ManufacturerResponse>), ErrorReply> {
    let manufacturer = ManufacturerService::new(state.db())
        .create(&req.name, &req.country)
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ManufacturerResponse::from(manufacturer)),
    ))
}

/// Update a manufacturer
#[utoipa::path(
    put,
    path = "/api/v1/manufacturers/{id}",
    tag = "manufacturers",
    params(
        ("id" = i64, Path, description = "Manufacturer id")
    ),
    request_body = UpdateManufacturerRequest,
    responses(
        (status = 200, description = "Manufacturer updated", body = ManufacturerResponse),
        (status = 400, description = "Missing or blank fields", body = ErrorResponse),
        (status = 404, description = "Manufacturer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, req))]
pub async fn update_manufacturer<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
    Json(req): Json<UpdateManufacturerRequest>,
) -> Result<Json<ManufacturerResponse>, ErrorReply> {
    let manufacturer = ManufacturerService::new(state.db())
        .update(id, &req.name, &req.country)
        .await
        .map_err(error_response)?;

    Ok(Json(ManufacturerResponse::from(manufacturer)))
}

/// Delete a manufacturer
#[utoipa::path(
    delete,
    path = "/api/v1/manufacturers/{id}",
    tag = "manufacturers",
    params(
        ("id" = i64, Path, description = "Manufacturer id")
    ),
    responses(
        (status = 204, description = "Manufacturer deleted"),
        (status = 404, description = "Manufacturer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_manufacturer<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
) -> Result<StatusCode, ErrorReply> {
    ManufacturerService::new(state.db())
        .delete(id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
