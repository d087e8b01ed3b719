use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGenerationDto {
    #[validate(length(
        min = 1,
        max = 1024,
        message = "prompt must be between 1 and 1024 characters."
    ))]
    pub prompt: String,
    #[validate(length(
        min = 1,
        max = 64,
        message = "style must be between 1 and 64 characters."
    ))]
    pub style: Option<String>,
    #[validate(url(message = "image_url must be a valid url."))]
    pub image_url: Option<String>,
}
