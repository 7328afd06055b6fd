// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::validation::FieldError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request - one entry per violated field
    Validation(Vec<FieldError>),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to JSON response body. Validation failures carry the full
    /// field-error list; everything else is a single message.
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::Validation(errors) => json!({ "errors": errors }),
            ApiError::NotFound(msg) => json!({ "error": msg }),
            ApiError::InternalServerError(msg) => json!({ "error": msg }),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<crate::services::property_service::PropertyError> for ApiError {
    fn from(err: crate::services::property_service::PropertyError) -> Self {
        use crate::services::property_service::PropertyError;
        match err {
            PropertyError::NotFound => ApiError::not_found("Property not found"),
            PropertyError::WriteConflict => {
                tracing::error!("update affected no rows after existence check passed");
                ApiError::internal_server_error("Internal server error")
            }
            PropertyError::Database(db_err) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("database error: {}", db_err);
                ApiError::internal_server_error("Internal server error")
            }
        }
    }
}

impl From<crate::database::manager::DatabaseError> for ApiError {
    fn from(err: crate::database::manager::DatabaseError) -> Self {
        tracing::error!("database error: {}", err);
        ApiError::internal_server_error("Internal server error")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Validation(errors) => write!(f, "validation failed on {} field(s)", errors.len()),
            ApiError::NotFound(msg) => write!(f, "{}", msg),
            ApiError::InternalServerError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
