//! Caller resolution.

use tracing::info;

use super::error::ServiceResult;
use crate::db::repository::UserRepository;
use crate::models::{NewUser, User};

/// Resolve an API token to its user. Unknown tokens resolve to `None`.
pub async fn authenticate<R>(repo: &R, api_token: &str) -> ServiceResult<Option<User>>
where
    R: UserRepository + ?Sized,
{
    if api_token.is_empty() {
        return Ok(None);
    }
    Ok(repo.find_user_by_token(api_token).await?)
}

/// Return the user holding `user.api_token`, creating it on first start.
pub async fn ensure_user<R>(repo: &R, user: NewUser) -> ServiceResult<User>
where
    R: UserRepository + ?Sized,
{
    if let Some(existing) = repo.find_user_by_token(&user.api_token).await? {
        return Ok(existing);
    }
    let created = repo.create_user(&user).await?;
    info!(user_id = %created.id, username = %created.username, "Created bootstrap user");
    Ok(created)
}
