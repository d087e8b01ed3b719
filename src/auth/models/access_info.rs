use serde::{Deserialize, Serialize};

use crate::users::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessInfo {
    pub token: String,
    pub user: AuthUser,
}

/// The slice of the user row the login response embeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl AuthUser {
    pub fn from_user(user: &User) -> Self {
        return Self {
            id: user.id.to_string(),
            username: user.username.to_string(),
            email: user.email.to_string(),
        };
    }
}
