//! JSON body extractor with enveloped rejections.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Drop-in replacement for [`axum::Json`] on the request side.
///
/// Syntax errors, a missing `Content-Type: application/json` header or a
/// body of the wrong JSON shape all become `400 VALIDATION_ERROR` with the
/// parser's explanation under `errors.body`. Field rules are not checked
/// here; that is the domain's job.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::JsonBody;
///
/// async fn create(JsonBody(input): JsonBody<UserInput>) { /* ... */ }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(data)| JsonBody(data))
            .map_err(|rejection| AppError::from(rejection).into_response())
    }
}
