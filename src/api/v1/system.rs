//! System health and status handlers.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Service banner DTO
#[derive(Serialize, ToSchema)]
pub struct ServiceInfo {
    #[schema(example = "dispatch")]
    pub name: String,
    #[schema(example = "0.1.0")]
    pub version: String,
}

/// Health response DTO
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

/// Service banner
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Service banner", body = ServiceInfo)
    )
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Health probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
