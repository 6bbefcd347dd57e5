//! HTTP API errors
//!
//! Error types for the HTTP surface and their status-code mapping. The
//! service layer stays transport-agnostic; this is the only place that knows
//! about status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::service::ServiceError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Request body is missing or structurally invalid
    #[error("Invalid request body or missing \"value\" field")]
    InvalidBody,

    /// The "value" field is present but not a string
    #[error("Invalid data type for \"value\" (must be string)")]
    InvalidValueType,

    /// A filter query parameter is malformed
    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    /// A required query parameter is missing
    #[error("Missing required parameter: {0}")]
    MissingParam(String),

    /// Create on an already-stored value
    #[error("String already exists in the system")]
    AlreadyExists,

    /// Get/delete on a value that is not stored
    #[error("String does not exist in the system")]
    NotFound,

    /// Natural-language query matched no rule
    #[error("Unable to parse natural language query")]
    Unparseable,

    /// Natural-language query produced an impossible length range
    #[error("Query parsed but resulted in conflicting filters")]
    ConflictingFilters,

    /// Repository or other internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody => StatusCode::BAD_REQUEST,
            ApiError::InvalidQueryParam(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingParam(_) => StatusCode::BAD_REQUEST,
            ApiError::Unparseable => StatusCode::BAD_REQUEST,

            ApiError::InvalidValueType => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ConflictingFilters => StatusCode::UNPROCESSABLE_ENTITY,

            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::AlreadyExists => StatusCode::CONFLICT,

            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::AlreadyExists => ApiError::AlreadyExists,
            ServiceError::NotFound => ApiError::NotFound,
            ServiceError::Unparseable => ApiError::Unparseable,
            ServiceError::ConflictingFilters => ApiError::ConflictingFilters,
            ServiceError::Repository(e) => ApiError::Internal(e.to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::InvalidBody.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidValueType.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::AlreadyExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(ApiError::Unparseable.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::ConflictingFilters.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_service_error_mapping() {
        assert!(matches!(
            ApiError::from(ServiceError::AlreadyExists),
            ApiError::AlreadyExists
        ));
        assert!(matches!(
            ApiError::from(ServiceError::NotFound),
            ApiError::NotFound
        ));
        assert!(matches!(
            ApiError::from(ServiceError::ConflictingFilters),
            ApiError::ConflictingFilters
        ));
    }

    #[test]
    fn test_error_response_body() {
        let body = ErrorResponse::from(ApiError::NotFound);
        assert_eq!(body.code, 404);
        assert_eq!(body.error, "String does not exist in the system");
    }
}
