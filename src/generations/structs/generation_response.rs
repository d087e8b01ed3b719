use serde::{Deserialize, Serialize};

use crate::generations::models::generation::Generation;

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub generation: Generation,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationsResponse {
    pub generations: Vec<Generation>,
}
