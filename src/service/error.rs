//! Service-level error types.
//!
//! Domain failures get dedicated variants with stable messages; storage
//! failures pass through transparently from the database layer.

use miette::Diagnostic;
use thiserror::Error;

use crate::db::DbError;

/// Business-logic errors.
#[derive(Error, Diagnostic, Debug)]
pub enum ServiceError {
    /// Credentials could not be verified. Deliberately carries no detail
    /// about which part failed.
    #[error("Login or password was incorrect")]
    #[diagnostic(code(dispatch::service::authentication))]
    Authentication,

    #[error("{message}")]
    #[diagnostic(code(dispatch::service::registration))]
    Registration { message: String },

    #[error("{message}")]
    #[diagnostic(code(dispatch::service::validation))]
    Validation { message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Db(#[from] DbError),
}

impl ServiceError {
    pub fn registration(message: &str) -> Self {
        ServiceError::Registration {
            message: message.to_string(),
        }
    }

    pub fn validation(message: &str) -> Self {
        ServiceError::Validation {
            message: message.to_string(),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
