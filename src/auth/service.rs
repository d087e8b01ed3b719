use std::sync::Arc;

use crate::{
    app::{errors::DefaultApiError, models::api_error::ApiError, util::hasher},
    users::{self, models::user::User},
    AppState,
};

use super::{
    dtos::{login_dto::LoginDto, signup_dto::SignupDto},
    errors::AuthApiError,
    jwt::util::sign_jwt,
    models::access_info::{AccessInfo, AuthUser},
};

pub async fn signup(dto: &SignupDto, state: &Arc<AppState>) -> Result<User, ApiError> {
    users::service::create_user_as_admin(dto, &state.pool).await
}

pub async fn login(dto: &LoginDto, state: &Arc<AppState>) -> Result<AccessInfo, ApiError> {
    match users::service::get_user_by_email_as_admin(&dto.email, &state.pool).await {
        Ok(user) => {
            let Ok(matches) =
                hasher::verify(dto.password.to_string(), user.password_hash.to_string()).await
            else {
                return Err(DefaultApiError::InternalServerError.value());
            };

            if !matches {
                return Err(AuthApiError::BadLogin.value());
            }

            Ok(AccessInfo {
                token: sign_jwt(&user.id, &state.envy.jwt_secret),
                user: AuthUser::from_user(&user),
            })
        }
        // same response as a bad password so login probes can't tell them apart
        Err(_) => Err(AuthApiError::BadLogin.value()),
    }
}
