//! Type-safe error codes for API responses.
//!
//! Each code carries:
//! - the string clients see in `error_code` (e.g. `"VALIDATION_ERROR"`)
//! - an integer attached to log events for monitoring (e.g. `1001`)
//! - a default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Invalid request parameters");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request body, query or field values failed validation
    ValidationError,

    /// An id-addressed resource does not exist
    ResourceNotFound,

    /// No route matches the request path
    NotFound,

    /// The route exists but not for this HTTP method
    MethodNotAllowed,

    // Server errors (5000-5999)
    /// An unexpected internal fault
    InternalError,
}

impl ErrorCode {
    /// String identifier for clients, as rendered in `error_code`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Integer code attached to structured log events.
    ///
    /// - 1000-1999: client errors
    /// - 5000-5999: server errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::ResourceNotFound => 1004,
            Self::NotFound => 1005,
            Self::MethodNotAllowed => 1006,
            Self::InternalError => 5000,
        }
    }

    /// Default user-facing message.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Invalid request parameters",
            Self::ResourceNotFound => "Resource not found",
            Self::NotFound => "The requested resource was not found",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError => "An internal server error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
