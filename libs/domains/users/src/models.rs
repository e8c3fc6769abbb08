use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::validation::not_blank;

/// Page used when the query omits `page` or supplies an unusable value.
pub const DEFAULT_PAGE: usize = 1;
/// Page size used when the query omits `limit` or supplies an unusable value.
pub const DEFAULT_LIMIT: usize = 10;
/// Largest page size a client may request.
pub const MAX_LIMIT: usize = 100;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier, assigned on creation
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address, unique across all users (case-insensitive)
    pub email: String,
    /// Creation timestamp (UTC, ISO-8601)
    pub created_at: DateTime<Utc>,
    /// Last update timestamp (UTC, ISO-8601)
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name,
            email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace name and email and refresh `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the wall clock does.
    pub fn apply_update(&mut self, name: String, email: String) {
        self.name = name;
        self.email = email;
        self.updated_at = Utc::now().max(self.updated_at);
    }

    /// Case-insensitive email comparison used for uniqueness checks.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }

    /// Case-insensitive substring match on name or email.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}

/// Request body for creating or replacing a user.
///
/// Both fields are optional at the JSON level so a missing field is
/// reported per field instead of failing the whole body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UserInput {
    #[validate(
        required(message = "Name is required"),
        custom(function = "not_blank", message = "Name must not be empty")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Email is required"),
        email(message = "Email must be a valid email address")
    )]
    pub email: Option<String>,
}

impl UserInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }
}

/// A `UserInput` that passed validation, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUser {
    pub name: String,
    pub email: String,
}

/// Raw query parameters for `GET /users`.
///
/// Kept as strings so unusable numbers fall back to defaults instead of
/// failing extraction.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Page size, 1 to 100 (default 10)
    pub limit: Option<String>,
    /// Case-insensitive substring matched against name and email
    pub search: Option<String>,
}

/// Normalised list request consumed by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
    pub search: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
        }
    }
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page,
            limit,
            search: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// Pagination block of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    /// Records matching the search, across all pages
    pub total: usize,
    /// Requested page
    pub page: usize,
    /// Page size
    pub limit: usize,
    /// Number of pages, 0 when `total` is 0
    pub pages: usize,
}

/// One page of users.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserPage {
    pub users: Vec<User>,
    pub pagination: Pagination,
}

/// `data` payload for single-user responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    pub user: User,
}
