use serde::Serialize;

/// Input to a submission. Immutable once handed to the coordinator.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub style: Option<String>,
    pub image_url: Option<String>,
}

impl GenerationRequest {
    pub fn new(prompt: &str) -> Self {
        return Self {
            prompt: prompt.to_string(),
            style: None,
            image_url: None,
        };
    }
}
