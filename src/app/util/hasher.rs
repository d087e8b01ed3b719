use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::app::{errors::DefaultApiError, models::api_error::ApiError};

pub async fn hash(password: String) -> Result<String, ApiError> {
    let spawn_result = tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
    })
    .await;

    match spawn_result {
        Ok(hash_result) => match hash_result {
            Ok(hash) => Ok(hash),
            Err(e) => {
                tracing::error!(%e);
                Err(DefaultApiError::InternalServerError.value())
            }
        },
        Err(e) => {
            tracing::error!(%e);
            Err(DefaultApiError::InternalServerError.value())
        }
    }
}

pub async fn verify(password: String, hash: String) -> Result<bool, ApiError> {
    let spawn_result = tokio::task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&hash)?;

        Ok::<_, argon2::password_hash::Error>(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    })
    .await;

    match spawn_result {
        Ok(verify_result) => match verify_result {
            Ok(matches) => Ok(matches),
            Err(e) => {
                tracing::error!(%e);
                Err(DefaultApiError::InternalServerError.value())
            }
        },
        Err(e) => {
            tracing::error!(%e);
            Err(DefaultApiError::InternalServerError.value())
        }
    }
}
