//! Database error types.
//!
//! This module provides abstracted error types for database operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! The error types are storage-backend agnostic.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(dispatch::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Entity already exists: {entity_type} with id '{id}'")]
    #[diagnostic(code(dispatch::db::already_exists))]
    AlreadyExists { entity_type: String, id: String },

    #[error("Invalid data: {message}")]
    #[diagnostic(code(dispatch::db::invalid_data))]
    InvalidData { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(dispatch::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(dispatch::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(dispatch::db::connection_error))]
    Connection { message: String },

    #[error("Constraint violation: {message}")]
    #[diagnostic(code(dispatch::db::constraint))]
    Constraint { message: String },
}

impl DbError {
    /// NotFound for an entity addressed by a numeric id.
    pub fn not_found(entity_type: &str, id: i64) -> Self {
        DbError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
