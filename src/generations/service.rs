use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    app::{
        errors::DefaultApiError,
        models::api_error::ApiError,
        util::sqlx::{get_code_from_db_err, SqlStateCodes},
    },
    auth::jwt::models::claims::Claims,
    AppState,
};

use super::{
    dtos::create_generation_dto::CreateGenerationDto, models::generation::Generation,
    GENERATION_HISTORY_LIMIT,
};

pub async fn create_generation(
    dto: &CreateGenerationDto,
    claims: &Claims,
    state: &Arc<AppState>,
) -> Result<Generation, ApiError> {
    if let Err(e) = state.backend.process().await {
        return Err(e);
    }

    let generation = Generation::new(claims, dto);

    let sqlx_result = sqlx::query(
        "
        INSERT INTO generations (
            id, user_id, prompt, style, image_url, status, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ",
    )
    .bind(&generation.id)
    .bind(&generation.user_id)
    .bind(&generation.prompt)
    .bind(&generation.style)
    .bind(&generation.image_url)
    .bind(&generation.status)
    .bind(generation.created_at.to_owned() as i64)
    .execute(&state.pool)
    .await;

    match sqlx_result {
        Ok(_) => Ok(generation),
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
                SqlStateCodes::UNIQUE_VIOLATION => Err(ApiError {
                    code: axum::http::StatusCode::CONFLICT,
                    message: "Generation already exists.".to_string(),
                }),
                _ => {
                    tracing::error!(%e);
                    Err(DefaultApiError::InternalServerError.value())
                }
            }
        }
    }
}

pub async fn get_generations(claims: &Claims, pool: &PgPool) -> Result<Vec<Generation>, ApiError> {
    let sqlx_result = sqlx::query_as::<_, Generation>(
        "
        SELECT * FROM generations
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        ",
    )
    .bind(&claims.id)
    .bind(GENERATION_HISTORY_LIMIT)
    .fetch_all(pool)
    .await;

    match sqlx_result {
        Ok(generations) => Ok(generations),
        Err(e) => {
            tracing::error!(%e);
            Err(DefaultApiError::InternalServerError.value())
        }
    }
}
