//! Credential verification.

use crate::db::{Database, Driver, DriverRepository};

use super::error::{ServiceError, ServiceResult};
use super::is_blank;

/// Hash a clear password to the stored SHA-256 hex digest.
pub fn hash_password(password: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Verifies login credentials against the driver table.
pub struct AuthService<'a, D: Database> {
    db: &'a D,
}

impl<'a, D: Database> AuthService<'a, D> {
    pub fn new(db: &'a D) -> Self {
        Self { db }
    }

    /// Verify credentials and return the matching driver.
    ///
    /// Blank credentials, unknown logins and wrong passwords all collapse
    /// into the same [`ServiceError::Authentication`] so callers cannot
    /// distinguish which check failed.
    pub async fn login(&self, login: &str, password: &str) -> ServiceResult<Driver> {
        if is_blank(login) || password.is_empty() {
            return Err(ServiceError::Authentication);
        }

        let Some(driver) = self.db.drivers().find_by_login(login).await? else {
            return Err(ServiceError::Authentication);
        };

        if driver.password_hash != hash_password(password) {
            return Err(ServiceError::Authentication);
        }

        Ok(driver)
    }
}
