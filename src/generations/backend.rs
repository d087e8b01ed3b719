use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::time::sleep;

use crate::app::{env::Envy, models::api_error::ApiError};

use super::errors::GenerationsApiError;

/// Seam between the request handlers and whatever serves the model.
/// Handlers only see this trait; the simulation below is one implementation.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn process(&self) -> Result<(), ApiError>;
}

/// Stand-in for a real model server: waits out an artificial processing
/// delay, then declares itself overloaded with a fixed probability.
pub struct SimulatedModelBackend {
    pub overload_rate: f64,
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
}

impl SimulatedModelBackend {
    pub fn from_envy(envy: &Envy) -> Self {
        return Self {
            overload_rate: envy.model_overload_rate.unwrap_or(0.2),
            delay_min_ms: envy.model_delay_min_ms.unwrap_or(1000),
            delay_max_ms: envy.model_delay_max_ms.unwrap_or(2000),
        };
    }
}

#[async_trait]
impl ModelBackend for SimulatedModelBackend {
    async fn process(&self) -> Result<(), ApiError> {
        // rng must not be held across the await
        let delay_ms = rand::thread_rng().gen_range(self.delay_min_ms..=self.delay_max_ms);

        if delay_ms > 0 {
            sleep(Duration::from_millis(delay_ms)).await;
        }

        let roll: f64 = rand::thread_rng().gen();

        if roll < self.overload_rate {
            tracing::warn!("simulated model overload");
            return Err(GenerationsApiError::ModelOverloaded.value());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    fn backend(overload_rate: f64) -> SimulatedModelBackend {
        SimulatedModelBackend {
            overload_rate,
            delay_min_ms: 0,
            delay_max_ms: 0,
        }
    }

    #[tokio::test]
    async fn zero_rate_never_overloads() {
        for _ in 0..50 {
            assert!(backend(0.0).process().await.is_ok());
        }
    }

    #[tokio::test]
    async fn full_rate_always_overloads() {
        for _ in 0..50 {
            let e = backend(1.0).process().await.unwrap_err();

            assert_eq!(e.code, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(e.message, "Model overloaded");
        }
    }
}
