//! Service-level error kinds.
//!
//! Handlers translate these into status codes in exactly one place
//! (`http::error::AppError`).

use thiserror::Error;

use super::validation::FieldErrors;
use crate::db::repository::RepositoryError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The record addressed by the request does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The payload failed validation or the booking was rejected.
    #[error("Validation failed: {0}")]
    ValidationFailed(FieldErrors),

    /// Any storage fault the caller cannot fix.
    #[error("Unexpected repository failure: {0}")]
    Unexpected(#[from] RepositoryError),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationFailed(FieldErrors::single(field, message))
    }

    /// Map a repository error from a lookup of the addressed record:
    /// NotFound stays NotFound, everything else is unexpected.
    pub fn from_lookup(err: RepositoryError, entity: &'static str, id: impl ToString) -> Self {
        if err.is_not_found() {
            Self::not_found(entity, id)
        } else {
            Self::Unexpected(err)
        }
    }
}

/// Message used when a related-record field names a missing row.
pub(crate) fn missing_related(id: impl std::fmt::Display) -> String {
    format!("Invalid pk \"{}\" - object does not exist.", id)
}
