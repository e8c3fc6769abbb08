//! User Service - Business logic layer

use observability::{UserMetrics, UserOperation, UserOutcome};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{PageRequest, Pagination, User, UserInput, UserPage};
use crate::repository::UserRepository;
use crate::validation::validate_user_input;

/// User service providing business logic operations
///
/// The only layer that combines validation with the repository. Every
/// operation records a `user_operations_total` outcome.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    /// Create a new UserService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate and store a new user
    #[instrument(skip(self, input))]
    pub async fn register_user(&self, input: UserInput) -> UserResult<User> {
        let result = self.register(input).await;
        record(UserOperation::Create, &result);
        result
    }

    async fn register(&self, input: UserInput) -> UserResult<User> {
        let valid = validate_user_input(&input)?;

        if self.repository.exists_by_email(&valid.email, None).await? {
            return Err(UserError::email_in_use());
        }

        let user = User::new(valid.name, valid.email);
        self.repository
            .create(user)
            .await
            .map_err(duplicate_as_validation)
    }

    /// Get a user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        let result = self
            .repository
            .get_by_id(id)
            .await
            .and_then(|user| user.ok_or(UserError::NotFound(id)));
        record(UserOperation::Get, &result);
        result
    }

    /// Replace name and email of an existing user
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: Uuid, input: UserInput) -> UserResult<User> {
        let result = self.update(id, input).await;
        record(UserOperation::Update, &result);
        result
    }

    async fn update(&self, id: Uuid, input: UserInput) -> UserResult<User> {
        let valid = validate_user_input(&input)?;

        let mut user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        if self.repository.exists_by_email(&valid.email, Some(id)).await? {
            return Err(UserError::email_in_use());
        }

        user.apply_update(valid.name, valid.email);
        self.repository
            .update(user)
            .await
            .map_err(duplicate_as_validation)
    }

    /// Delete a user
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        let result = match self.repository.delete(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(UserError::NotFound(id)),
            Err(e) => Err(e),
        };
        record(UserOperation::Delete, &result);
        result
    }

    /// One page of users, optionally filtered by a search term
    ///
    /// A page past the end is not an error; it comes back empty with the
    /// real `total` and `pages`.
    #[instrument(skip(self))]
    pub async fn list_users(&self, request: PageRequest) -> UserResult<UserPage> {
        let result = self
            .repository
            .list(request.search.clone())
            .await
            .map(|matching| paginate(matching, request.page, request.limit));

        match &result {
            Ok(page) => UserMetrics::record_list(page.users.len(), page.pagination.total),
            Err(_) => record(UserOperation::List, &result),
        }
        result
    }
}

/// Slice `users` to the requested page. A `limit` of 0 is treated as 1.
pub fn paginate(users: Vec<User>, page: usize, limit: usize) -> UserPage {
    let limit = limit.max(1);
    let total = users.len();
    let pages = total.div_ceil(limit);
    let start = page.saturating_sub(1).saturating_mul(limit);

    let users = users.into_iter().skip(start).take(limit).collect();

    UserPage {
        users,
        pagination: Pagination {
            total,
            page,
            limit,
            pages,
        },
    }
}

fn duplicate_as_validation(err: UserError) -> UserError {
    match err {
        UserError::DuplicateEmail(_) => UserError::email_in_use(),
        other => other,
    }
}

fn classify<T>(result: &UserResult<T>) -> UserOutcome {
    match result {
        Ok(_) => UserOutcome::Success,
        Err(UserError::Validation(_) | UserError::DuplicateEmail(_)) => UserOutcome::ValidationError,
        Err(UserError::NotFound(_)) => UserOutcome::NotFound,
        Err(UserError::Internal(_)) => UserOutcome::InternalError,
    }
}

fn record<T>(operation: UserOperation, result: &UserResult<T>) {
    let outcome = classify(result);
    if let Err(e) = result {
        tracing::debug!(
            operation = operation.as_str(),
            outcome = outcome.as_str(),
            error = %e,
            "User operation failed"
        );
    }
    UserMetrics::record(operation, outcome);
}
