use std::sync::Arc;

use axum::{
    extract::State,
    headers::{authorization::Bearer, Authorization},
    http::StatusCode,
    Json, TypedHeader,
};
use validator::Validate;

use crate::{
    app::models::{api_error::ApiError, json_from_request::JsonFromRequest},
    auth::jwt::models::claims::Claims,
    AppState,
};

use super::{
    dtos::create_generation_dto::CreateGenerationDto,
    service,
    structs::generation_response::{GenerationResponse, GenerationsResponse},
};

pub async fn create_generation(
    State(state): State<Arc<AppState>>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
    JsonFromRequest(dto): JsonFromRequest<CreateGenerationDto>,
) -> Result<(StatusCode, Json<GenerationResponse>), ApiError> {
    match Claims::from_header(authorization, &state.envy.jwt_secret) {
        Ok(claims) => {
            if let Err(e) = dto.validate() {
                return Err(ApiError {
                    code: StatusCode::BAD_REQUEST,
                    message: e.to_string(),
                });
            }

            match service::create_generation(&dto, &claims, &state).await {
                Ok(generation) => Ok((StatusCode::CREATED, Json(GenerationResponse { generation }))),
                Err(e) => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}

pub async fn get_generations(
    State(state): State<Arc<AppState>>,
    TypedHeader(authorization): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<GenerationsResponse>, ApiError> {
    match Claims::from_header(authorization, &state.envy.jwt_secret) {
        Ok(claims) => match service::get_generations(&claims, &state.pool).await {
            Ok(generations) => Ok(Json(GenerationsResponse { generations })),
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    }
}
