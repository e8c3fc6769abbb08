use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Repository trait for User persistence
///
/// Implementations must enforce case-insensitive email uniqueness inside
/// `create` and `update` so that concurrent writers cannot both succeed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// All users in insertion order, optionally filtered by a lowercase
    /// substring of name or email
    async fn list(&self, search: Option<String>) -> UserResult<Vec<User>>;

    /// Replace a stored user
    async fn update(&self, user: User) -> UserResult<User>;

    /// Delete a user by ID
    async fn delete(&self, id: Uuid) -> UserResult<bool>;

    /// Check if an email is used by any user other than `exclude_id`
    async fn exists_by_email(&self, email: &str, exclude_id: Option<Uuid>) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository
///
/// Backed by a `Vec` so listings come back in insertion order. Clones
/// share the same storage.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn email_taken(users: &[User], email: &str, exclude_id: Option<Uuid>) -> bool {
    users
        .iter()
        .any(|u| Some(u.id) != exclude_id && u.has_email(email))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if email_taken(&users, &user.email, None) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.push(user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self, search: Option<String>) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let result = match search {
            Some(needle) => {
                let needle = needle.to_lowercase();
                users.iter().filter(|u| u.matches(&needle)).cloned().collect()
            }
            None => users.clone(),
        };

        Ok(result)
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if email_taken(&users, &user.email, Some(user.id)) {
            return Err(UserError::DuplicateEmail(user.email));
        }

        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(UserError::NotFound(user.id))?;
        *slot = user.clone();

        tracing::info!(user_id = %user.id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let mut users = self.users.write().await;

        let Some(index) = users.iter().position(|u| u.id == id) else {
            return Ok(false);
        };
        users.remove(index);

        tracing::info!(user_id = %id, "Deleted user");
        Ok(true)
    }

    async fn exists_by_email(&self, email: &str, exclude_id: Option<Uuid>) -> UserResult<bool> {
        let users = self.users.read().await;
        Ok(email_taken(&users, email, exclude_id))
    }
}
