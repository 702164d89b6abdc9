use serde::{Deserialize, Serialize};

crate::define_id_type!(i64, UserId);

/// Account that owns properties.
///
/// The API token is what the `Authorization: Token <key>` header resolves
/// against; it is never serialized back to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub api_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub api_token: String,
}

impl NewUser {
    pub(crate) fn into_user(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            api_token: self.api_token,
        }
    }
}
