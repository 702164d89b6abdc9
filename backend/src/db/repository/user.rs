//! User repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{NewUser, User, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a user.
    ///
    /// # Returns
    /// * `Err(RepositoryError::Conflict)` - If the API token is already in use
    async fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;

    /// Retrieve a user by id.
    async fn get_user(&self, user_id: UserId) -> RepositoryResult<User>;

    /// Resolve an API token to its user, if any.
    async fn find_user_by_token(&self, api_token: &str) -> RepositoryResult<Option<User>>;

    /// Delete a user and every property they own.
    async fn delete_user(&self, user_id: UserId) -> RepositoryResult<usize>;
}
