use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use super::models::{generation_request::GenerationRequest, session::Session};

/// A response the backend actually produced: status plus parsed JSON body.
/// Transport-level failures with no response at all are `TransportError`.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct TransportError {
    pub message: String,
}

#[async_trait]
pub trait GenerationTransport: Send + Sync {
    async fn send(&self, request: &GenerationRequest)
        -> Result<TransportResponse, TransportError>;
}

/// Default transport: POST /generations as JSON with a bearer token.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpTransport {
    pub fn new(base_url: &str, bearer_token: Option<String>) -> Self {
        return Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token,
        };
    }

    pub fn with_session(base_url: &str, session: &Session) -> Self {
        Self::new(base_url, Some(session.token.to_string()))
    }
}

#[async_trait]
impl GenerationTransport for HttpTransport {
    async fn send(
        &self,
        request: &GenerationRequest,
    ) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .post([self.base_url.as_str(), "/generations"].concat())
            .json(request);

        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }

        match builder.send().await {
            Ok(res) => {
                let status = res.status();
                let body = res.json::<Value>().await.unwrap_or(Value::Null);

                Ok(TransportResponse { status, body })
            }
            Err(e) => {
                tracing::error!(%e);
                Err(TransportError {
                    message: e.to_string(),
                })
            }
        }
    }
}
