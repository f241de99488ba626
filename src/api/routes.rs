//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_sessions::{MemoryStore, SessionManagerLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::state::AppState;
use super::v1;
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dispatch API",
        version = "0.1.0",
        description = "Taxi-dispatch management API",
        license(name = "GPL-2.0")
    ),
    paths(
        v1::root,
        v1::health,
        v1::register,
        v1::login,
        v1::logout,
        v1::me,
        v1::list_drivers,
        v1::get_driver,
        v1::create_driver,
        v1::update_driver,
        v1::delete_driver,
        v1::my_cars,
        v1::list_manufacturers,
        v1::get_manufacturer,
        v1::create_manufacturer,
        v1::update_manufacturer,
        v1::delete_manufacturer,
        v1::list_cars,
        v1::get_car,
        v1::create_car,
        v1::update_car,
        v1::delete_car,
        v1::add_driver_to_car,
        v1::remove_driver_from_car,
        v1::list_orders,
        v1::get_order,
        v1::create_order,
        v1::update_order,
        v1::complete_order,
        v1::delete_order,
    ),
    components(
        schemas(
            v1::ServiceInfo,
            v1::HealthResponse,
            v1::ErrorResponse,
            v1::RegisterRequest,
            v1::LoginRequest,
            v1::DriverResponse,
            v1::CreateDriverRequest,
            v1::UpdateDriverRequest,
            v1::PaginatedDrivers,
            v1::ManufacturerResponse,
            v1::CreateManufacturerRequest,
            v1::UpdateManufacturerRequest,
            v1::PaginatedManufacturers,
            v1::CarResponse,
            v1::CreateCarRequest,
            v1::UpdateCarRequest,
            v1::PaginatedCars,
            v1::OrderResponse,
            v1::CreateOrderRequest,
            v1::UpdateOrderRequest,
            v1::PaginatedOrders,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "auth", description = "Registration, login and session endpoints"),
        (name = "drivers", description = "Driver management endpoints"),
        (name = "manufacturers", description = "Manufacturer management endpoints"),
        (name = "cars", description = "Car management and driver assignment endpoints"),
        (name = "orders", description = "Dispatch order endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with session support and OpenAPI documentation
pub fn create_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    // Cookie-backed sessions; the store lives as long as the router
    let session_layer = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);

    // System routes (non-generic)
    let system_routes = Router::new()
        .route("/", get(v1::root))
        .route("/health", get(v1::health))
        .route("/api/v1/auth/logout", get(v1::logout));

    // Auth routes (generic over Database)
    let auth_routes = routes!(D => {
        post "/api/v1/auth/register" => v1::register,
        post "/api/v1/auth/login" => v1::login,
        get "/api/v1/auth/me" => v1::me,
    });

    // Driver routes (generic over Database)
    let driver_routes = routes!(D => {
        get "/api/v1/drivers" => v1::list_drivers,
        get "/api/v1/drivers/me/cars" => v1::my_cars,
        get "/api/v1/drivers/{id}" => v1::get_driver,
        post "/api/v1/drivers" => v1::create_driver,
        put "/api/v1/drivers/{id}" => v1::update_driver,
        delete "/api/v1/drivers/{id}" => v1::delete_driver,
    });

    // Manufacturer routes (generic over Database)
    let manufacturer_routes = routes!(D => {
        get "/api/v1/manufacturers" => v1::list_manufacturers,
        get "/api/v1/manufacturers/{id}" => v1::get_manufacturer,
        post "/api/v1/manufacturers" => v1::create_manufacturer,
        put "/api/v1/manufacturers/{id}" => v1::update_manufacturer,
        delete "/api/v1/manufacturers/{id}" => v1::delete_manufacturer,
    });

    // Car routes (generic over Database)
    let car_routes = routes!(D => {
        get "/api/v1/cars" => v1::list_cars,
        get "/api/v1/cars/{id}" => v1::get_car,
        post "/api/v1/cars" => v1::create_car,
        put "/api/v1/cars/{id}" => v1::update_car,
        delete "/api/v1/cars/{id}" => v1::delete_car,
        post "/api/v1/cars/{id}/drivers/{driver_id}" => v1::add_driver_to_car,
        delete "/api/v1/cars/{id}/drivers/{driver_id}" => v1::remove_driver_from_car,
    });

    // Order routes (generic over Database)
    let order_routes = routes!(D => {
        get "/api/v1/orders" => v1::list_orders,
        get "/api/v1/orders/{id}" => v1::get_order,
        post "/api/v1/orders" => v1::create_order,
        put "/api/v1/orders/{id}" => v1::update_order,
        post "/api/v1/orders/{id}/complete" => v1::complete_order,
        delete "/api/v1/orders/{id}" => v1::delete_order,
    });

    system_routes
        .merge(auth_routes)
        .merge(driver_routes)
        .merge(manufacturer_routes)
        .merge(car_routes)
        .merge(order_routes)
        .merge(Scalar::with_url("/docs", api))
        .layer(session_layer)
        .with_state(state)
}
