//! Request validation: field rules for user bodies and list-query
//! normalisation. Nothing here touches storage.

use validator::{Validate, ValidationError};

pub use axum_helpers::FieldErrors;

use crate::models::{
    DEFAULT_LIMIT, DEFAULT_PAGE, ListUsersQuery, MAX_LIMIT, PageRequest, UserInput, ValidUser,
};

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Check a create/replace body and return its trimmed values.
///
/// Every failing field is reported, not just the first one.
pub fn validate_user_input(input: &UserInput) -> Result<ValidUser, FieldErrors> {
    let trimmed = UserInput {
        name: input.name.as_deref().map(|s| s.trim().to_string()),
        email: input.email.as_deref().map(|s| s.trim().to_string()),
    };

    trimmed.validate().map_err(FieldErrors::from)?;

    match (trimmed.name, trimmed.email) {
        (Some(name), Some(email)) => Ok(ValidUser { name, email }),
        (None, _) => Err(FieldErrors::single("name", "Name is required")),
        (_, None) => Err(FieldErrors::single("email", "Email is required")),
    }
}

/// Turn raw list query parameters into a usable page request.
///
/// Unusable values never fail the request:
/// - `page` missing, non-numeric or below 1 becomes 1
/// - `limit` missing, non-numeric, below 1 or above 100 becomes 10
/// - `search` is trimmed, and dropped when empty
pub fn normalize_page_request(query: &ListUsersQuery) -> PageRequest {
    let page = parse_positive(query.page.as_deref()).unwrap_or(DEFAULT_PAGE);
    let limit = parse_positive(query.limit.as_deref())
        .filter(|&limit| limit <= MAX_LIMIT)
        .unwrap_or(DEFAULT_LIMIT);
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    PageRequest {
        page,
        limit,
        search,
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw?.trim().parse::<usize>().ok().filter(|&n| n >= 1)
}
