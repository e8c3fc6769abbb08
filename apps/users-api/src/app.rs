//! Router assembly

use axum::{middleware, routing::get, Router};
use axum_helpers::{cors_layer, create_router, health_router};
use domain_users::{InMemoryUserRepository, UserRepository, UserService};
use observability::{metrics_handler, metrics_middleware};
use tracing::info;

use crate::api;
use crate::config::Config;
use crate::openapi::ApiDoc;

/// Full HTTP surface: `/api/v1/users`, `/health`, `/metrics` and the
/// OpenAPI document.
pub fn build<R: UserRepository + 'static>(config: &Config, repository: R) -> eyre::Result<Router> {
    let cors = cors_layer(config.cors_origin.as_deref())?;
    let service = UserService::new(repository);

    let router = create_router::<ApiDoc>(api::routes(service), cors)
        .merge(health_router(config.app))
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(metrics_middleware));

    Ok(router)
}

/// Shutdown cleanup: the in-memory records are dropped with the process.
pub async fn discard_store(repository: InMemoryUserRepository) {
    let users = repository.len().await;
    info!(users, "Shutting down: discarding in-memory user store");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, server::ServerConfig, Environment};
    use domain_users::UserInput;
    use http_body_util::BodyExt;
    use std::future::Future;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn config() -> Config {
        Config {
            app: app_info!(),
            server: ServerConfig::default(),
            environment: Environment::Development,
            cors_origin: None,
        }
    }

    fn router() -> Router {
        build(&config(), InMemoryUserRepository::new()).unwrap()
    }

    async fn call(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_users_are_mounted_under_api_v1() {
        let router = router();

        let (status, created) = call(
            &router,
            "POST",
            "/api/v1/users",
            Some(json!({ "name": "Ada", "email": "ada@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let id = created["data"]["user"]["id"].as_str().unwrap();
        let (status, fetched) = call(&router, "GET", &format!("/api/v1/users/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["data"]["user"]["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn test_health_reports_package() {
        let (status, body) = call(&router(), "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name"], env!("CARGO_PKG_NAME"));
    }

    #[tokio::test]
    async fn test_unknown_route_uses_error_envelope() {
        let (status, body) = call(&router(), "GET", "/api/v2/users", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");
        assert_eq!(body["error_code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_openapi_document_lists_user_paths() {
        let (status, body) = call(&router(), "GET", "/api-docs/openapi.json", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"].get("/api/v1/users").is_some());
        assert!(body["paths"].get("/api/v1/users/{id}").is_some());
    }

    #[tokio::test]
    async fn test_metrics_endpoint_responds() {
        let router = router();

        let response = router
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    fn assert_send<F: Future + Send + 'static>(_: &F) {}

    #[tokio::test]
    async fn test_discard_store_is_a_send_cleanup() {
        let repository = InMemoryUserRepository::new();
        UserService::new(repository.clone())
            .register_user(UserInput::new("Ada", "ada@example.com"))
            .await
            .unwrap();

        let cleanup = discard_store(repository.clone());
        assert_send(&cleanup);

        let handle = tokio::spawn(cleanup);
        handle.await.unwrap();
        assert_eq!(repository.len().await, 1);
    }
}
