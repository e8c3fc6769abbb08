use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Build the CORS layer from a comma-separated origin list.
///
/// `None` (or a list that is only whitespace and commas) yields a layer
/// that accepts any origin without credentials, which is what a gateway
/// fronted proof-of-concept wants. A non-empty list restricts origins to
/// exactly those values.
pub fn cors_layer(allowed_origins: Option<&str>) -> io::Result<CorsLayer> {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    let origins = allowed_origins
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid CORS origin '{}': {}", s, e),
                )
            })
        })
        .collect::<io::Result<Vec<_>>>()?;

    if origins.is_empty() {
        tracing::info!("CORS configured to allow any origin");
        return Ok(base.allow_origin(Any));
    }

    tracing::info!(count = origins.len(), "CORS configured with explicit origins");
    Ok(base.allow_origin(AllowOrigin::list(origins)))
}
