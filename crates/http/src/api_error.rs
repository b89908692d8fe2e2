//! Typed API error for HTTP handlers.
//!
//! Converts service errors into status codes and the
//! `{"payload": {"errors": [...]}}` body in one place.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fauna_core::{FieldError, ValidationErrors};
use fauna_service::ServiceError;
use fauna_storage::StorageError;

use crate::response_types::{ErrorsBody, Payload};

/// API error with HTTP status code and client-facing field errors.
///
/// `Internal` logs the real error server-side and returns a static message,
/// so storage details never reach the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: one entry per failed rule.
    BadRequest(Vec<FieldError>),
    /// 404 Not Found.
    NotFound(String),
    /// 500 Internal Server Error. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, errors) = match self {
            Self::BadRequest(errors) => (StatusCode::BAD_REQUEST, errors),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, vec![FieldError::general(msg)]),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    vec![FieldError::general("internal server error")],
                )
            },
        };
        (status, Json(Payload::new(ErrorsBody { errors }))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::BadRequest(errors.into_errors())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(vec![FieldError::general(rejection.body_text())])
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        // A route/handler mismatch is a server bug, not a bad request.
        if rejection.status().is_server_error() {
            return Self::Internal(anyhow::anyhow!(rejection.body_text()));
        }
        Self::BadRequest(vec![FieldError::general(rejection.body_text())])
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => errors.into(),
            ServiceError::NotFound { .. } => Self::NotFound(err.to_string()),
            ServiceError::Conflict { .. } => {
                Self::BadRequest(vec![FieldError::new("commonName", err.to_string())])
            },
            ServiceError::Storage(StorageError::NotFound { entity, id }) => {
                Self::NotFound(format!("{entity} '{id}' not found"))
            },
            ServiceError::Storage(_) => Self::Internal(err.into()),
        }
    }
}
