//! V1 API handlers.

mod auth;
mod cars;
mod drivers;
mod manufacturers;
mod orders;
mod system;

#[cfg(test)]
mod drivers_test;
#[cfg(test)]
mod orders_test;

pub use auth::*;
pub use cars::*;
pub use drivers::*;
pub use manufacturers::*;
pub use orders::*;
pub use system::*;

use axum::Json;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::api::session::AuthSession;
use crate::db::{Database, DbError, Driver, DriverRepository, ListQuery, SortOrder};
use crate::service::ServiceError;

/// Error response DTO
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Driver not found")]
    pub error: String,
}

pub(crate) type ErrorReply = (StatusCode, Json<ErrorResponse>);

pub(crate) fn reply(status: StatusCode, message: impl Into<String>) -> ErrorReply {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map a service error to the HTTP status it represents.
pub(crate) fn error_response(err: ServiceError) -> ErrorReply {
    let status = match &err {
        ServiceError::Authentication => StatusCode::UNAUTHORIZED,
        ServiceError::Registration { message }
            if message == crate::service::MSG_LOGIN_TAKEN =>
        {
            StatusCode::CONFLICT
        }
        ServiceError::Registration { .. } | ServiceError::Validation { .. } => {
            StatusCode::BAD_REQUEST
        }
        ServiceError::Db(DbError::NotFound { .. }) => StatusCode::NOT_FOUND,
        ServiceError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    reply(status, err.to_string())
}

pub(crate) fn session_error(err: tower_sessions::session::Error) -> ErrorReply {
    reply(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

/// Load the logged-in driver from the session, or fail with 401.
///
/// A session pointing at a driver that no longer exists (deleted after
/// login) is treated as not logged in.
pub(crate) async fn require_driver<D: Database>(
    state: &AppState<D>,
    session: &Session,
) -> Result<Driver, ErrorReply> {
    let auth = AuthSession::new(session);
    let Some(driver_id) = auth.driver_id().await.map_err(session_error)? else {
        return Err(reply(StatusCode::UNAUTHORIZED, "Not logged in"));
    };

    match state.db().drivers().get(driver_id).await {
        Ok(driver) => Ok(driver),
        Err(DbError::NotFound { .. }) => Err(reply(StatusCode::UNAUTHORIZED, "Not logged in")),
        Err(e) => Err(reply(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

/// Pagination and sorting query parameters shared by list endpoints.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListParams {
    /// Maximum number of items to return
    #[param(example = 20)]
    pub limit: Option<usize>,
    /// Number of items to skip
    #[param(example = 0)]
    pub offset: Option<usize>,
    /// Field to sort by (validated per entity)
    #[param(example = "created_at")]
    pub sort: Option<String>,
    /// Sort order (asc, desc)
    #[param(example = "desc")]
    pub order: Option<String>,
}

impl ListParams {
    pub(crate) fn to_query(&self) -> ListQuery {
        ListQuery {
            limit: self.limit,
            offset: self.offset,
            sort_by: self.sort.clone(),
            sort_order: match self.order.as_deref() {
                Some("desc") => Some(SortOrder::Desc),
                Some("asc") => Some(SortOrder::Asc),
                _ => None,
            },
        }
    }
}
