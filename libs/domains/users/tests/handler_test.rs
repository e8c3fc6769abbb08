//! Handler tests for Users domain
//!
//! These tests drive the users router directly with `oneshot`:
//! - Request deserialization and validation
//! - Response envelope shape
//! - HTTP status codes
//! - Error responses

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    handlers::router(UserService::new(InMemoryUserRepository::new()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn create(app: &Router, name: &str, email: &str) -> User {
    let (status, body) = send(
        app,
        json_request("POST", "/", json!({ "name": name, "email": email })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    serde_json::from_value(body["data"]["user"].clone()).unwrap()
}

#[tokio::test]
async fn test_create_user_handler_returns_201() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "Ada Lovelace", "email": "ada@example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["status"], "success");
    let user = &body["data"]["user"];
    assert_eq!(user["name"], "Ada Lovelace");
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["created_at"], user["updated_at"]);
    assert!(user["id"].as_str().unwrap().parse::<uuid::Uuid>().is_ok());
}

#[tokio::test]
async fn test_created_user_round_trips_through_get() {
    let app = app();
    let created = create(&app, "Ada", "ada@example.com").await;

    let (status, body) = send(&app, empty_request("GET", &format!("/{}", created.id))).await;

    assert_eq!(status, StatusCode::OK);
    let fetched: User = serde_json::from_value(body["data"]["user"].clone()).unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_user_handler_validates_input() {
    let app = app();

    let (status, body) = send(&app, json_request("POST", "/", json!({ "name": "" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error_code"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Invalid request parameters");
    assert!(body["errors"]["name"].is_array());
    assert_eq!(body["errors"]["email"], json!(["Email is required"]));
}

#[tokio::test]
async fn test_create_user_accepts_long_name() {
    let app = app();
    let name = "a".repeat(101);

    let created = create(&app, &name, "long@example.com").await;

    assert_eq!(created.name, name);
}

#[tokio::test]
async fn test_create_user_rejects_invalid_email() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request("POST", "/", json!({ "name": "Ada", "email": "not-an-email" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"].get("name").is_none());
}

#[tokio::test]
async fn test_duplicate_email_returns_400_on_email() {
    let app = app();
    create(&app, "Ada", "ada@example.com").await;

    let (status, body) = send(
        &app,
        json_request("POST", "/", json!({ "name": "Someone Else", "email": "ADA@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_ERROR");
    assert_eq!(body["errors"]["email"], json!(["Email is already in use"]));
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_ERROR");
    assert!(body["errors"]["body"].is_array());
}

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::from(r#"{"name":"Ada","email":"ada@example.com"}"#))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_unknown_user_returns_404() {
    let app = app();

    let (status, body) = send(
        &app,
        empty_request("GET", &format!("/{}", uuid::Uuid::now_v7())),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "User not found");
    assert_eq!(body["error_code"], "RESOURCE_NOT_FOUND");
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_non_uuid_id_answers_like_unknown_id() {
    let app = app();

    let (_, unknown) = send(
        &app,
        empty_request("GET", &format!("/{}", uuid::Uuid::now_v7())),
    )
    .await;

    for method in ["GET", "DELETE"] {
        let (status, body) = send(&app, empty_request(method, "/not-a-uuid")).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
        assert_eq!(body, unknown, "{method}");
        assert_eq!(body["message"], "User not found");
    }

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/not-a-uuid",
            json!({ "name": "Ada", "email": "ada@example.com" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, unknown);
}

#[tokio::test]
async fn test_update_user_replaces_fields() {
    let app = app();
    let created = create(&app, "Ada", "ada@example.com").await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({ "name": "Ada Lovelace", "email": "lovelace@example.com" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated: User = serde_json::from_value(body["data"]["user"].clone()).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Ada Lovelace");
    assert_eq!(updated.email, "lovelace@example.com");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_update_user_may_keep_its_own_email() {
    let app = app();
    let created = create(&app, "Ada", "ada@example.com").await;

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({ "name": "Ada L.", "email": "ada@example.com" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_user_rejects_taken_email() {
    let app = app();
    create(&app, "Ada", "ada@example.com").await;
    let bob = create(&app, "Bob", "bob@example.com").await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/{}", bob.id),
            json!({ "name": "Bob", "email": "ada@example.com" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["email"], json!(["Email is already in use"]));
}

#[tokio::test]
async fn test_update_unknown_user_returns_404() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/{}", uuid::Uuid::now_v7()),
            json!({ "name": "Ghost", "email": "ghost@example.com" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_delete_user_returns_204_then_404() {
    let app = app();
    let created = create(&app, "Ada", "ada@example.com").await;
    let uri = format!("/{}", created.id);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());

    let (status, _) = send(&app, empty_request("GET", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_empty_store() {
    let app = app();

    let (status, body) = send(&app, empty_request("GET", "/?page=1&limit=10")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "success",
            "data": {
                "users": [],
                "pagination": { "total": 0, "page": 1, "limit": 10, "pages": 0 }
            }
        })
    );
}

#[tokio::test]
async fn test_list_search_is_case_insensitive() {
    let app = app();
    create(&app, "John Smith", "smith@example.com").await;
    create(&app, "Johnny Cash", "cash@example.com").await;
    create(&app, "Someone", "big.john@example.com").await;
    create(&app, "Jane Doe", "jane@example.com").await;
    create(&app, "Mary", "mary@example.com").await;

    let (status, body) = send(&app, empty_request("GET", "/?search=JOHN")).await;

    assert_eq!(status, StatusCode::OK);
    let page: UserPage = serde_json::from_value(body["data"].clone()).unwrap();
    assert_eq!(page.users.len(), 3);
    assert_eq!(page.pagination.total, 3);
    assert!(
        page.users
            .iter()
            .all(|u| u.name.to_lowercase().contains("john") || u.email.contains("john"))
    );
}

#[tokio::test]
async fn test_list_page_beyond_last_is_empty() {
    let app = app();
    for i in 0..5 {
        create(&app, &format!("User {i}"), &format!("user{i}@example.com")).await;
    }

    let (status, body) = send(&app, empty_request("GET", "/?page=99&limit=10")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["users"], json!([]));
    assert_eq!(
        body["data"]["pagination"],
        json!({ "total": 5, "page": 99, "limit": 10, "pages": 1 })
    );
}

#[tokio::test]
async fn test_list_returns_insertion_order_across_pages() {
    let app = app();
    for i in 0..5 {
        create(&app, &format!("User {i}"), &format!("user{i}@example.com")).await;
    }

    let (_, body) = send(&app, empty_request("GET", "/?page=2&limit=2")).await;
    let page: UserPage = serde_json::from_value(body["data"].clone()).unwrap();

    let names: Vec<&str> = page.users.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["User 2", "User 3"]);
    assert_eq!(page.pagination.pages, 3);
}

#[tokio::test]
async fn test_list_invalid_paging_falls_back_to_defaults() {
    let app = app();

    let (status, body) = send(&app, empty_request("GET", "/?page=-3&limit=500")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["page"], 1);
    assert_eq!(body["data"]["pagination"]["limit"], 10);

    let (status, body) = send(&app, empty_request("GET", "/?page=abc&limit=0")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["page"], 1);
    assert_eq!(body["data"]["pagination"]["limit"], 10);
}
