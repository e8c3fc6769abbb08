pub mod codes;
pub mod field_errors;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;
pub use field_errors::FieldErrors;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::response::ResponseStatus;

/// Error envelope returned for every non-2xx response.
///
/// # JSON Example
///
/// ```json
/// {
///   "status": "error",
///   "message": "Invalid request parameters",
///   "error_code": "VALIDATION_ERROR",
///   "errors": { "email": ["Email is already in use"] }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `"error"`
    pub status: ResponseStatus,
    /// Human-readable error message
    pub message: String,
    /// Machine-readable error identifier
    pub error_code: ErrorCode,
    /// Field-level detail, present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            error_code: code,
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = Some(errors);
        self
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// This is the only place where failures become status codes:
///
/// | Variant | Status | `error_code` |
/// |---|---|---|
/// | `JsonExtractorRejection`, `InvalidFields` | 400 | `VALIDATION_ERROR` |
/// | `NotFound` | 404 | `RESOURCE_NOT_FOUND` |
/// | `InternalServerError` | 500 | `INTERNAL_ERROR` |
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Invalid fields: {0}")]
    InvalidFields(FieldErrors),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::InvalidFields(errors)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(_) | AppError::InvalidFields(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::JsonExtractorRejection(_) | AppError::InvalidFields(_) => {
                ErrorCode::ValidationError
            }
            AppError::NotFound(_) => ErrorCode::ResourceNotFound,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error_code();

        let body = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = code.code(),
                    "JSON extraction error: {}",
                    e.body_text()
                );
                ErrorResponse::new(code, code.default_message())
                    .with_errors(FieldErrors::single("body", e.body_text()))
            }
            AppError::InvalidFields(errors) => {
                tracing::info!(error_code = code.code(), %errors, "Validation error");
                ErrorResponse::new(code, code.default_message()).with_errors(errors)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = code.code(), "Not found: {}", msg);
                ErrorResponse::new(code, msg)
            }
            AppError::InternalServerError(msg) => {
                // detail stays in the log
                tracing::error!(error_code = code.code(), "Internal server error: {}", msg);
                ErrorResponse::new(code, code.default_message())
            }
        };

        (status, Json(body)).into_response()
    }
}
