use axum::{
    Router,
    extract::{FromRequestParts, Query, State},
    http::{StatusCode, request::Parts},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ApiResponse, AppError, JsonBody, UuidPath,
    errors::responses::{BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{USER_NOT_FOUND, UserResult};
use crate::models::{ListUsersQuery, Pagination, User, UserEnvelope, UserInput, UserPage};
use crate::repository::UserRepository;
use crate::service::UserService;
use crate::validation::normalize_page_request;

pub const TAG: &str = "users";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(
        schemas(User, UserInput, Pagination, UserPage, UserEnvelope),
        responses(NotFoundResponse, BadRequestValidationResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// `{id}` path segment of a user route.
///
/// An id that is not a UUID gets the same 404 "User not found" answer as a
/// well-formed id with no record behind it.
pub struct UserId(pub Uuid);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match UuidPath::from_request_parts(parts, state).await {
            Ok(UuidPath(id)) => Ok(UserId(id)),
            Err(AppError::NotFound(_)) => Err(AppError::NotFound(USER_NOT_FOUND.to_string())),
            Err(other) => Err(other),
        }
    }
}

/// Create the user router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(shared_service)
}

/// List users with pagination and optional search
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ListUsersQuery),
    responses(
        (status = 200, description = "One page of users", body = ApiResponse<UserPage>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Query(query): Query<ListUsersQuery>,
) -> UserResult<ApiResponse<UserPage>> {
    let request = normalize_page_request(&query);
    let page = service.list_users(request).await?;

    tracing::info!(
        page = page.pagination.page,
        limit = page.pagination.limit,
        total = page.pagination.total,
        "Retrieved users"
    );
    Ok(ApiResponse::success(page))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = UserInput,
    responses(
        (status = 201, description = "User created successfully", body = ApiResponse<UserEnvelope>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonBody(input): JsonBody<UserInput>,
) -> UserResult<impl IntoResponse> {
    let user = service.register_user(input).await?;
    Ok((StatusCode::CREATED, ApiResponse::success(UserEnvelope { user })))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserEnvelope>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UserId(id): UserId,
) -> UserResult<ApiResponse<UserEnvelope>> {
    let user = service.get_user(id).await?;
    Ok(ApiResponse::success(UserEnvelope { user }))
}

/// Replace a user's name and email
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UserInput,
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse<UserEnvelope>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UserId(id): UserId,
    JsonBody(input): JsonBody<UserInput>,
) -> UserResult<ApiResponse<UserEnvelope>> {
    let user = service.update_user(id, input).await?;
    Ok(ApiResponse::success(UserEnvelope { user }))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UserId(id): UserId,
) -> UserResult<StatusCode> {
    service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
