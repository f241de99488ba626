//! Manufacturer management.

use crate::db::{Database, Id, ListQuery, ListResult, Manufacturer, ManufacturerRepository};

use super::error::{ServiceError, ServiceResult};
use super::{MSG_EMPTY_ENTRY, is_blank};

/// Manufacturer CRUD.
pub struct ManufacturerService<'a, D: Database> {
    db: &'a D,
}

impl<'a, D: Database> ManufacturerService<'a, D> {
    pub fn new(db: &'a D) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: &str, country: &str) -> ServiceResult<Manufacturer> {
        if is_blank(name) || is_blank(country) {
            return Err(ServiceError::validation(MSG_EMPTY_ENTRY));
        }

        let manufacturer = Manufacturer {
            id: 0,
            name: name.to_string(),
            country: country.to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        };

        Ok(self.db.manufacturers().create(&manufacturer).await?)
    }

    pub async fn get(&self, id: Id) -> ServiceResult<Manufacturer> {
        Ok(self.db.manufacturers().get(id).await?)
    }

    pub async fn list(&self, query: Option<&ListQuery>) -> ServiceResult<ListResult<Manufacturer>> {
        Ok(self.db.manufacturers().list(query).await?)
    }

    pub async fn update(&self, id: Id, name: &str, country: &str) -> ServiceResult<Manufacturer> {
        if is_blank(name) || is_blank(country) {
            return Err(ServiceError::validation(MSG_EMPTY_ENTRY));
        }

        let mut manufacturer = self.db.manufacturers().get(id).await?;
        manufacturer.name = name.to_string();
        manufacturer.country = country.to_string();

        self.db.manufacturers().update(&manufacturer).await?;
        Ok(self.db.manufacturers().get(id).await?)
    }

    pub async fn delete(&self, id: Id) -> ServiceResult<()> {
        Ok(self.db.manufacturers().delete(id).await?)
    }
}
