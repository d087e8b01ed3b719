use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    app::util::time, auth::jwt::models::claims::Claims,
    generations::dtos::create_generation_dto::CreateGenerationDto,
    generations::enums::generation_status::GenerationStatus,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Generation {
    pub id: String,
    pub user_id: String,
    pub prompt: String,
    pub style: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    #[sqlx(try_from = "i64")]
    pub created_at: u64,
}

impl Generation {
    pub fn new(claims: &Claims, dto: &CreateGenerationDto) -> Self {
        return Self {
            id: Uuid::new_v4().to_string(),
            user_id: claims.id.to_string(),
            prompt: dto.prompt.to_string(),
            style: dto.style.clone(),
            image_url: dto.image_url.clone(),
            status: GenerationStatus::Completed.value().to_string(),
            created_at: time::current_time_in_secs(),
        };
    }
}
