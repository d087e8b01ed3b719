use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum GenerationsApiError {
    ModelOverloaded,
}

impl GenerationsApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::ModelOverloaded => ApiError {
                code: StatusCode::SERVICE_UNAVAILABLE,
                message: "Model overloaded".to_string(),
            },
        }
    }
}
