//! Type-safe wrapper over the login session.
//!
//! Centralizes the session key and value type for the authenticated
//! driver so handlers cannot drift apart on either.

use tower_sessions::Session;

use crate::db::Id;

const SESSION_DRIVER_ID: &str = "auth:driver_id";

/// Authentication state of one request's session.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Store the driver id after a successful login.
    pub async fn set_driver_id(&self, driver_id: Id) -> Result<(), tower_sessions::session::Error> {
        self.session.insert(SESSION_DRIVER_ID, driver_id).await
    }

    /// Driver id of the logged-in driver, if any.
    pub async fn driver_id(&self) -> Result<Option<Id>, tower_sessions::session::Error> {
        self.session.get::<Id>(SESSION_DRIVER_ID).await
    }

    /// Invalidate the session (logout).
    pub async fn clear(&self) -> Result<(), tower_sessions::session::Error> {
        self.session.flush().await
    }
}
