//! Dispatch-order handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::{ErrorReply, ErrorResponse, ListParams, error_response, reply};
use crate::api::AppState;
use crate::db::{Database, Id, Order, OrderStatus};
use crate::service::{NewOrder, OrderService};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Order response DTO
#[derive(Serialize, ToSchema)]
pub struct OrderResponse {
    /// Unique identifier
    #[schema(example = 1)]
    pub id: Id,
    #[schema(example = 1)]
    pub car_id: Id,
    #[schema(example = 1)]
    pub driver_id: Id,
    #[schema(example = "Bob")]
    pub passenger_name: String,
    #[schema(example = "1 Main St")]
    pub pickup_address: String,
    #[schema(example = "42 Elm St")]
    pub dropoff_address: String,
    /// One of: open, in_progress, completed, cancelled
    #[schema(example = "open")]
    pub status: String,
    /// Creation timestamp
    #[schema(example = "2025-01-01 00:00:00")]
    pub created_at: String,
    /// Completion timestamp, set when the order is completed
    pub completed_at: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            car_id: o.car_id,
            driver_id: o.driver_id,
            passenger_name: o.passenger_name,
            pickup_address: o.pickup_address,
            dropoff_address: o.dropoff_address,
            status: o.status.to_string(),
            created_at: o.created_at,
            completed_at: o.completed_at,
        }
    }
}

/// Create order request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[schema(example = 1)]
    pub car_id: Id,
    #[schema(example = 1)]
    pub driver_id: Id,
    #[schema(example = "Bob")]
    pub passenger_name: String,
    #[schema(example = "1 Main St")]
    pub pickup_address: String,
    #[schema(example = "42 Elm St")]
    pub dropoff_address: String,
}

/// Update order request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    #[schema(example = "Bob")]
    pub passenger_name: String,
    #[schema(example = "1 Main St")]
    pub pickup_address: String,
    #[schema(example = "42 Elm St")]
    pub dropoff_address: String,
    /// One of: open, in_progress, completed, cancelled
    #[schema(example = "in_progress")]
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedOrders {
    pub items: Vec<OrderResponse>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

// =============================================================================
// Handlers
// =============================================================================

/// List all orders
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    tag = "orders",
    params(ListParams),
    responses(
        (status = 200, description = "Paginated list of orders", body = PaginatedOrders),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_orders<D: Database>(
    State(state): State<AppState<D>>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedOrders>, ErrorReply> {
    let result = OrderService::new(state.db())
        .list(Some(&params.to_query()))
        .await
        .map_err(error_response)?;

    Ok(Json(PaginatedOrders {
        items: result.items.into_iter().map(OrderResponse::from).collect(),
        total: result.total,
        limit: result.limit.unwrap_or(50),
        offset: result.offset,
    }))
}

/// Get an order by id
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    tag = "orders",
    params(
        ("id" = i64, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_order<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
) -> Result<Json<OrderResponse>, ErrorReply> {
    let order = OrderService::new(state.db())
        .get(id)
        .await
        .map_err(error_response)?;

    Ok(Json(OrderResponse::from(order)))
}

/// Create a new order
///
/// The order starts in `open` state; car and driver must exist
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Missing or blank fields", body = ErrorResponse),
        (status = 404, description = "Car or driver not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, req))]
pub async fn create_order<D: Database>(
    State(state): State<AppState<D>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ErrorReply> {
    let order = OrderService::new(state.db())
        .create(&NewOrder {
            car_id: req.car_id,
            driver_id: req.driver_id,
            passenger_name: req.passenger_name,
            pickup_address: req.pickup_address,
            dropoff_address: req.dropoff_address,
        })
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}

/// Update an order
#[utoipa::path(
    put,
    path = "/api/v1/orders/{id}",
    tag = "orders",
    params(
        ("id" = i64, Path, description = "Order id")
    ),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Missing fields or unknown status", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, req))]
pub async fn update_order<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
    Json(req): Json<UpdateOrderRequest>,
) -> Result<Json<OrderResponse>, ErrorReply> {
    let status: OrderStatus = req
        .status
        .parse()
        .map_err(|e: String| reply(StatusCode::BAD_REQUEST, e))?;

    let order = OrderService::new(state.db())
        .update(
            id,
            &req.passenger_name,
            &req.pickup_address,
            &req.dropoff_address,
            status,
        )
        .await
        .map_err(error_response)?;

    Ok(Json(OrderResponse::from(order)))
}

/// Complete an order
///
/// Transitions the order to `completed` and stamps the completion time
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/complete",
    tag = "orders",
    params(
        ("id" = i64, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "Order completed", body = OrderResponse),
        (status = 400, description = "Order already completed or cancelled", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn complete_order<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
) -> Result<Json<OrderResponse>, ErrorReply> {
    let order = OrderService::new(state.db())
        .complete(id)
        .await
        .map_err(error_response)?;

    Ok(Json(OrderResponse::from(order)))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/api/v1/orders/{id}",
    tag = "orders",
    params(
        ("id" = i64, Path, description = "Order id")
    ),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_order<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<Id>,
) -> Result<StatusCode, ErrorReply> {
    OrderService::new(state.db())
        .delete(id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
