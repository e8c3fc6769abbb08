//! API routes module

use axum::Router;
use domain_users::{handlers, UserRepository, UserService};

/// Create all API routes, relative to `/api`
pub fn routes<R: UserRepository + 'static>(users: UserService<R>) -> Router {
    Router::new().nest("/v1/users", handlers::router(users))
}
