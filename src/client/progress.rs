use std::time::Duration;

use super::errors::ErrorKind;

/// One event per retry and one per terminal outcome, suitable for driving
/// toast-style feedback without coupling the retry loop to any UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Retrying {
        attempt: u32,
        max_retries: u32,
        delay: Duration,
    },
    Completed,
    Failed { kind: ErrorKind, message: String },
    Cancelled,
}

pub trait ProgressSink: Send + Sync {
    fn notify(&self, event: &ProgressEvent);
}

/// Default sink: logs through tracing. Cancellation is user-initiated, so it
/// is reported at info rather than in the error channel.
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn notify(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Retrying {
                attempt,
                max_retries,
                ..
            } => {
                tracing::warn!("Model overloaded. Retry {}/{}...", attempt, max_retries);
            }
            ProgressEvent::Completed => {
                tracing::info!("Generation created successfully!");
            }
            ProgressEvent::Failed { message, .. } => {
                tracing::error!("{}", message);
            }
            ProgressEvent::Cancelled => {
                tracing::info!("Generation cancelled");
            }
        }
    }
}
