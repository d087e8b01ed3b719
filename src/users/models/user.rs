use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{app::util::time, auth::dtos::signup_dto::SignupDto};

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub username_key: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub email_key: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sqlx(try_from = "i64")]
    pub updated_at: u64,
    #[sqlx(try_from = "i64")]
    pub created_at: u64,
}

impl User {
    pub fn new(dto: &SignupDto, hash: String) -> Self {
        let current_time = time::current_time_in_secs();

        return Self {
            id: Uuid::new_v4().to_string(),
            username: dto.username.to_string(),
            username_key: dto.username.to_lowercase(),
            email: dto.email.to_string(),
            email_key: dto.email.to_lowercase(),
            password_hash: hash,
            updated_at: current_time,
            created_at: current_time,
        };
    }
}
