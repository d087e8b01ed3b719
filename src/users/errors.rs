use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum UsersApiError {
    UserNotFound,
    UserAlreadyExists,
}

impl UsersApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::UserNotFound => ApiError {
                code: StatusCode::NOT_FOUND,
                message: "User not found.".to_string(),
            },
            Self::UserAlreadyExists => ApiError {
                code: StatusCode::CONFLICT,
                message: "User already exists.".to_string(),
            },
        }
    }
}
