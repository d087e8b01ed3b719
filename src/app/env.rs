use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    pub app_env: String,
    pub port: Option<u16>,

    pub database_url: String,

    pub jwt_secret: String,

    pub model_overload_rate: Option<f64>,
    pub model_delay_min_ms: Option<u64>,
    pub model_delay_max_ms: Option<u64>,
}
