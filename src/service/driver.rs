//! Driver registration and management.

use crate::db::{Database, Driver, DriverRepository, Id, ListQuery, ListResult};

use super::auth::hash_password;
use super::error::{ServiceError, ServiceResult};
use super::{MSG_EMPTY_ENTRY, MSG_LOGIN_TAKEN, is_blank};

/// Input for driver registration.
#[derive(Debug, Clone)]
pub struct NewDriver {
    pub name: String,
    pub license_number: String,
    pub login: String,
    pub password: String,
}

/// Driver CRUD with login-uniqueness enforcement.
pub struct DriverService<'a, D: Database> {
    db: &'a D,
}

impl<'a, D: Database> DriverService<'a, D> {
    pub fn new(db: &'a D) -> Self {
        Self { db }
    }

    /// Register a new driver. The login must not be taken by another
    /// non-deleted driver; the password is stored as a digest.
    pub async fn register(&self, new_driver: &NewDriver) -> ServiceResult<Driver> {
        let NewDriver {
            name,
            license_number,
            login,
            password,
        } = new_driver;

        if is_blank(name) || is_blank(license_number) || is_blank(login) || is_blank(password) {
            return Err(ServiceError::registration(MSG_EMPTY_ENTRY));
        }

        if self.db.drivers().find_by_login(login).await?.is_some() {
            return Err(ServiceError::registration(MSG_LOGIN_TAKEN));
        }

        let driver = Driver {
            id: 0,
            name: name.clone(),
            license_number: license_number.clone(),
            login: login.clone(),
            password_hash: hash_password(password),
            created_at: String::new(),
            updated_at: String::new(),
        };

        Ok(self.db.drivers().create(&driver).await?)
    }

    pub async fn get(&self, id: Id) -> ServiceResult<Driver> {
        Ok(self.db.drivers().get(id).await?)
    }

    /// Find a driver by login, failing with an authentication error when
    /// no such driver exists.
    pub async fn find_by_login(&self, login: &str) -> ServiceResult<Driver> {
        self.db
            .drivers()
            .find_by_login(login)
            .await?
            .ok_or(ServiceError::Authentication)
    }

    pub async fn list(&self, query: Option<&ListQuery>) -> ServiceResult<ListResult<Driver>> {
        Ok(self.db.drivers().list(query).await?)
    }

    /// Update name, license number and login of an existing driver. A
    /// `new_password` of `None` keeps the stored digest.
    pub async fn update(
        &self,
        id: Id,
        name: &str,
        license_number: &str,
        login: &str,
        new_password: Option<&str>,
    ) -> ServiceResult<Driver> {
        if is_blank(name) || is_blank(license_number) || is_blank(login) {
            return Err(ServiceError::validation(MSG_EMPTY_ENTRY));
        }
        if new_password.is_some_and(is_blank) {
            return Err(ServiceError::validation(MSG_EMPTY_ENTRY));
        }

        let mut driver = self.db.drivers().get(id).await?;

        // The login may only collide with the driver being updated
        if let Some(existing) = self.db.drivers().find_by_login(login).await?
            && existing.id != id
        {
            return Err(ServiceError::registration(MSG_LOGIN_TAKEN));
        }

        driver.name = name.to_string();
        driver.license_number = license_number.to_string();
        driver.login = login.to_string();
        if let Some(password) = new_password {
            driver.password_hash = hash_password(password);
        }

        self.db.drivers().update(&driver).await?;
        Ok(self.db.drivers().get(id).await?)
    }

    pub async fn delete(&self, id: Id) -> ServiceResult<()> {
        Ok(self.db.drivers().delete(id).await?)
    }
}
