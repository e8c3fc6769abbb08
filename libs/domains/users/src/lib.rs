//! Users Domain
//!
//! CRUD, pagination and search over user records held in memory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, response envelope
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business rules, pagination, metrics
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌────────────┐
//! │ Repository  │     │ Validation │  ← Field rules, query defaults
//! └──────┬──────┘     └────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, inputs, page types
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{
//!     handlers,
//!     repository::InMemoryUserRepository,
//!     service::UserService,
//! };
//!
//! // Create repository and service
//! let repository = InMemoryUserRepository::new();
//! let service = UserService::new(repository);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{
    ListUsersQuery, PageRequest, Pagination, User, UserEnvelope, UserInput, UserPage, ValidUser,
};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
pub use validation::{FieldErrors, normalize_page_request, validate_user_input};
