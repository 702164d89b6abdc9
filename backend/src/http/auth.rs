//! Token authentication.
//!
//! Callers send `Authorization: Token <api_token>`; the token resolves to a
//! [`User`] through the repository. Anything else is rejected with 401.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::error::AppError;
use super::state::AppState;
use crate::models::User;
use crate::services::users;

const SCHEME: &str = "token";

/// The user making the request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Extract the key from a `Token <key>` header value. The scheme is
/// case-insensitive.
pub fn parse_token(header: &str) -> Option<&str> {
    let (scheme, key) = header.trim().split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case(SCHEME) {
        return None;
    }
    let key = key.trim();
    (!key.is_empty()).then_some(key)
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_token)
            .ok_or(AppError::Unauthorized)?;

        users::authenticate(state.repository.as_ref(), token)
            .await?
            .map(AuthenticatedUser)
            .ok_or(AppError::Unauthorized)
    }
}
