use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FieldErrors};
use thiserror::Error;
use uuid::Uuid;

pub const USER_NOT_FOUND: &str = "User not found";
pub const EMAIL_IN_USE: &str = "Email is already in use";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    #[error("User not found: {0}")]
    NotFound(Uuid),

    /// Raised by repositories; the service turns it into `Validation`.
    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UserError {
    pub fn email_in_use() -> Self {
        UserError::Validation(FieldErrors::single("email", EMAIL_IN_USE))
    }
}

impl From<FieldErrors> for UserError {
    fn from(errors: FieldErrors) -> Self {
        UserError::Validation(errors)
    }
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(errors) => AppError::InvalidFields(errors),
            UserError::DuplicateEmail(_) => {
                AppError::InvalidFields(FieldErrors::single("email", EMAIL_IN_USE))
            }
            UserError::NotFound(_) => AppError::NotFound(USER_NOT_FOUND.to_string()),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
