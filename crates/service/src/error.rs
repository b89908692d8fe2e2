//! Typed error enum for the service layer.
//!
//! Callers match on the failure mode; the HTTP layer maps each variant to a
//! status code in one place.

use fauna_core::ValidationErrors;
use fauna_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying validation, lookup and storage failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// One or more request fields failed validation.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    /// The addressed animal does not exist.
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    /// Another animal already owns this slug.
    #[error("an animal with name slug '{slug}' already exists")]
    Conflict { slug: String },

    /// Storage operation failed (DB, pool, timeout).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
}

impl ServiceError {
    pub(crate) fn animal_not_found(key: impl ToString) -> Self {
        Self::NotFound { entity: "animal", key: key.to_string() }
    }

    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_transient())
    }

    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this error represents a duplicate slug.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
