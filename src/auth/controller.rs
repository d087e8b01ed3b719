use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    app::models::{api_error::ApiError, json_from_request::JsonFromRequest},
    users::models::user::User,
    AppState,
};

use super::{
    dtos::{login_dto::LoginDto, signup_dto::SignupDto},
    models::access_info::AccessInfo,
    service,
};

pub async fn signup(
    State(state): State<Arc<AppState>>,
    JsonFromRequest(dto): JsonFromRequest<SignupDto>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    match dto.validate() {
        Ok(_) => match service::signup(&dto, &state).await {
            Ok(user) => Ok((StatusCode::CREATED, Json(user))),
            Err(e) => Err(e),
        },
        Err(e) => Err(ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        }),
    }
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonFromRequest(dto): JsonFromRequest<LoginDto>,
) -> Result<Json<AccessInfo>, ApiError> {
    match dto.validate() {
        Ok(_) => match service::login(&dto, &state).await {
            Ok(access_info) => Ok(Json(access_info)),
            Err(e) => Err(e),
        },
        Err(e) => Err(ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        }),
    }
}
