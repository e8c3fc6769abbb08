//! UUID path parameter extractor.

use crate::errors::{AppError, ErrorCode};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

/// Extractor for a single UUID path parameter.
///
/// Ids are opaque to clients, so a value that does not parse as a UUID
/// cannot name an existing record and is rejected as
/// `404 RESOURCE_NOT_FOUND` with the generic "Resource not found" message.
/// The rejection is an [`AppError`], so a domain extractor wrapping this one
/// can swap in its own not-found message and answer exactly as it does for
/// a well-formed unknown id.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::UuidPath;
///
/// async fn get_user(UuidPath(id): UuidPath) -> String {
///     format!("User ID: {}", id)
/// }
///
/// let app = Router::new().route("/users/{id}", get(get_user));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let not_found =
            || AppError::NotFound(ErrorCode::ResourceNotFound.default_message().to_string());

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Path id could not be extracted");
                not_found()
            })?;

        Uuid::parse_str(&raw).map(UuidPath).map_err(|_| {
            tracing::debug!(id = %raw, "Path id is not a UUID");
            not_found()
        })
    }
}
