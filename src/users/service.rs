use sqlx::PgPool;

use crate::{
    app::{
        errors::DefaultApiError,
        models::api_error::ApiError,
        util::{
            hasher,
            sqlx::{get_code_from_db_err, SqlStateCodes},
        },
    },
    auth::dtos::signup_dto::SignupDto,
};

use super::{errors::UsersApiError, models::user::User};

pub async fn create_user_as_admin(dto: &SignupDto, pool: &PgPool) -> Result<User, ApiError> {
    let Ok(hash) = hasher::hash(dto.password.to_string()).await
    else {
        return Err(DefaultApiError::InternalServerError.value());
    };

    let user = User::new(dto, hash);

    let sqlx_result = sqlx::query(
        "
        INSERT INTO users (
            id, username, username_key, email, email_key,
            password_hash, updated_at, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ",
    )
    .bind(&user.id)
    .bind(&user.username)
    .bind(&user.username_key)
    .bind(&user.email)
    .bind(&user.email_key)
    .bind(&user.password_hash)
    .bind(user.updated_at.to_owned() as i64)
    .bind(user.created_at.to_owned() as i64)
    .execute(pool)
    .await;

    match sqlx_result {
        Ok(_) => Ok(user),
        Err(e) => {
            let Some(db_err) = e.as_database_error()
            else {
                tracing::error!(%e);
                return Err(DefaultApiError::InternalServerError.value());
            };

            let Some(code) = get_code_from_db_err(db_err)
            else {
                tracing::error!(%e);
                return Err(DefaultApiError::InternalServerError.value());
            };

            match code.as_str() {
                SqlStateCodes::UNIQUE_VIOLATION => Err(UsersApiError::UserAlreadyExists.value()),
                _ => {
                    tracing::error!(%e);
                    Err(DefaultApiError::InternalServerError.value())
                }
            }
        }
    }
}

pub async fn get_user_by_email_as_admin(email: &str, pool: &PgPool) -> Result<User, ApiError> {
    let sqlx_result = sqlx::query_as::<_, User>(
        "
        SELECT * FROM users WHERE email_key = $1
        ",
    )
    .bind(email.to_lowercase())
    .fetch_optional(pool)
    .await;

    match sqlx_result {
        Ok(user) => match user {
            Some(user) => Ok(user),
            None => Err(UsersApiError::UserNotFound.value()),
        },
        Err(e) => {
            tracing::error!(%e);
            Err(DefaultApiError::InternalServerError.value())
        }
    }
}
