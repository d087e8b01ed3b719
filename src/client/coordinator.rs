use std::{sync::Arc, sync::Mutex, time::Duration};

use tokio::{sync::watch, time::sleep};
use tokio_retry::strategy::ExponentialBackoff;

use crate::generations::{models::generation::Generation, structs::generation_response::GenerationResponse};

use super::{
    config::{BACKOFF_BASE_MS, BACKOFF_MAX_MS, MAX_RETRIES},
    errors::{extract_error_message, ErrorKind, GenerateError},
    models::generation_request::GenerationRequest,
    progress::{ProgressEvent, ProgressSink},
    transport::GenerationTransport,
};

/// Owns the lifecycle of one in-flight generation submission: send, retry on
/// overload with exponential backoff, cooperative cancellation, and
/// classification of the terminal outcome.
///
/// A second `submit` on the same coordinator supersedes the one in flight:
/// the earlier caller observes `Cancelled` and the new submission proceeds.
pub struct GenerationCoordinator {
    transport: Arc<dyn GenerationTransport>,
    sink: Arc<dyn ProgressSink>,
    cancel_tx: Mutex<Option<watch::Sender<bool>>>,
}

/// 1s, 2s, 4s, ... capped at 10s.
fn backoff_delays() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor(BACKOFF_BASE_MS / 2)
        .max_delay(Duration::from_millis(BACKOFF_MAX_MS))
}

impl GenerationCoordinator {
    pub fn new(transport: Arc<dyn GenerationTransport>, sink: Arc<dyn ProgressSink>) -> Self {
        return Self {
            transport,
            sink,
            cancel_tx: Mutex::new(None),
        };
    }

    /// Aborts the submission currently in flight, if any. The pending
    /// `submit` settles with `Cancelled`. No effect otherwise.
    pub fn cancel(&self) {
        if let Some(cancel_tx) = self.cancel_tx.lock().unwrap().take() {
            let _ = cancel_tx.send(true);
        }
    }

    pub async fn submit(&self, request: GenerationRequest) -> Result<Generation, GenerateError> {
        if request.prompt.trim().is_empty() {
            return Err(self.fail(ErrorKind::EmptyPrompt, None));
        }

        let (cancel_tx, mut cancel_rx) = watch::channel(false);

        if let Some(superseded) = self.cancel_tx.lock().unwrap().replace(cancel_tx) {
            let _ = superseded.send(true);
        }

        let mut delays = backoff_delays();
        let mut attempt: u32 = 0;

        loop {
            let send_result = tokio::select! {
                biased;
                _ = cancel_rx.changed() => return Err(self.cancelled()),
                result = self.transport.send(&request) => result,
            };

            let res = match send_result {
                Ok(res) => res,
                Err(e) => {
                    tracing::error!("{}", e.message);
                    return Err(self.fail(ErrorKind::NetworkError, None));
                }
            };

            match res.status.as_u16() {
                // created
                201 => {
                    let Ok(response) = serde_json::from_value::<GenerationResponse>(res.body)
                    else {
                        return Err(self.fail(ErrorKind::Unknown, None));
                    };

                    self.sink.notify(&ProgressEvent::Completed);
                    return Ok(response.generation);
                }
                // model overloaded, the only retryable failure
                503 => {
                    if attempt >= MAX_RETRIES {
                        return Err(self.fail(ErrorKind::Overloaded, None));
                    }

                    attempt += 1;
                    let delay = delays
                        .next()
                        .unwrap_or(Duration::from_millis(BACKOFF_MAX_MS));

                    self.sink.notify(&ProgressEvent::Retrying {
                        attempt,
                        max_retries: MAX_RETRIES,
                        delay,
                    });

                    tokio::select! {
                        biased;
                        _ = cancel_rx.changed() => return Err(self.cancelled()),
                        _ = sleep(delay) => {}
                    }
                }
                401 => return Err(self.fail(ErrorKind::Unauthorized, None)),
                400 => {
                    return Err(
                        self.fail(ErrorKind::InvalidRequest, extract_error_message(&res.body))
                    );
                }
                _ => {
                    return Err(self.fail(ErrorKind::Unknown, extract_error_message(&res.body)));
                }
            }
        }
    }

    fn fail(&self, kind: ErrorKind, message: Option<String>) -> GenerateError {
        let error = match message {
            Some(message) => GenerateError::with_message(kind, message),
            None => GenerateError::new(kind),
        };

        self.sink.notify(&ProgressEvent::Failed {
            kind,
            message: error.message.to_string(),
        });

        error
    }

    fn cancelled(&self) -> GenerateError {
        self.sink.notify(&ProgressEvent::Cancelled);
        GenerateError::new(ErrorKind::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::json;
    use tokio::sync::Notify;

    use crate::client::transport::{TransportError, TransportResponse};

    use super::*;

    enum Script {
        Respond(Result<TransportResponse, TransportError>),
        Hang,
    }

    struct MockTransport {
        steps: Mutex<VecDeque<Script>>,
        calls: AtomicUsize,
        called: Notify,
    }

    impl MockTransport {
        fn scripted(steps: Vec<Script>) -> Arc<Self> {
            Arc::new(Self {
                steps: Mutex::new(steps.into()),
                calls: AtomicUsize::new(0),
                called: Notify::new(),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerationTransport for MockTransport {
        async fn send(
            &self,
            _request: &GenerationRequest,
        ) -> Result<TransportResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.called.notify_one();

            let step = self
                .steps
                .lock()
                .unwrap()
                .pop_front()
                .expect("transport called more times than scripted");

            match step {
                Script::Respond(result) => result,
                Script::Hang => futures::future::pending().await,
            }
        }
    }

    struct RecordingSink {
        events: Mutex<Vec<ProgressEvent>>,
    }

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                events: Mutex::new(Vec::new()),
            })
        }

        fn events(&self) -> Vec<ProgressEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ProgressSink for RecordingSink {
        fn notify(&self, event: &ProgressEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn coordinator(
        transport: &Arc<MockTransport>,
        sink: &Arc<RecordingSink>,
    ) -> Arc<GenerationCoordinator> {
        Arc::new(GenerationCoordinator::new(
            transport.clone(),
            sink.clone(),
        ))
    }

    fn sample_generation() -> Generation {
        Generation {
            id: "gen-1".to_string(),
            user_id: "user-1".to_string(),
            prompt: "a lighthouse in a storm".to_string(),
            style: Some("watercolor".to_string()),
            image_url: Some("https://cdn.example.com/ref.png".to_string()),
            status: "completed".to_string(),
            created_at: 1700000000,
        }
    }

    fn created(generation: &Generation) -> Script {
        Script::Respond(Ok(TransportResponse {
            status: StatusCode::CREATED,
            body: json!({ "generation": generation }),
        }))
    }

    fn overloaded() -> Script {
        Script::Respond(Ok(TransportResponse {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: json!({ "error": "Model overloaded" }),
        }))
    }

    fn status(status: StatusCode, body: serde_json::Value) -> Script {
        Script::Respond(Ok(TransportResponse { status, body }))
    }

    #[tokio::test]
    async fn empty_prompt_fails_without_touching_transport() {
        let transport = MockTransport::scripted(vec![]);
        let sink = RecordingSink::new();
        let coordinator = coordinator(&transport, &sink);

        let error = coordinator
            .submit(GenerationRequest::new("   \t"))
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::EmptyPrompt);
        assert_eq!(error.message, "Please enter a prompt.");
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn overload_exhausts_after_four_attempts_with_backoff() {
        let transport = MockTransport::scripted(vec![
            overloaded(),
            overloaded(),
            overloaded(),
            overloaded(),
        ]);
        let sink = RecordingSink::new();
        let coordinator = coordinator(&transport, &sink);

        let start = tokio::time::Instant::now();
        let error = coordinator
            .submit(GenerationRequest::new("a lighthouse in a storm"))
            .await
            .unwrap_err();
        let elapsed = start.elapsed();

        assert_eq!(error.kind, ErrorKind::Overloaded);
        assert_eq!(transport.calls(), 4);

        // 1s + 2s + 4s between the four attempts
        assert!(elapsed >= Duration::from_millis(7000));
        assert!(elapsed < Duration::from_millis(7100));

        let events = sink.events();
        assert_eq!(events.len(), 4);
        for (index, event) in events.iter().take(3).enumerate() {
            assert_eq!(
                *event,
                ProgressEvent::Retrying {
                    attempt: index as u32 + 1,
                    max_retries: MAX_RETRIES,
                    delay: Duration::from_millis(1000 << index),
                }
            );
        }
        assert!(matches!(
            events[3],
            ProgressEvent::Failed {
                kind: ErrorKind::Overloaded,
                ..
            }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_on_third_attempt_after_two_overloads() {
        let generation = sample_generation();
        let transport =
            MockTransport::scripted(vec![overloaded(), overloaded(), created(&generation)]);
        let sink = RecordingSink::new();
        let coordinator = coordinator(&transport, &sink);

        let result = coordinator
            .submit(GenerationRequest::new("a lighthouse in a storm"))
            .await
            .unwrap();

        assert_eq!(result, generation);
        assert_eq!(transport.calls(), 3);
        assert_eq!(sink.events().last(), Some(&ProgressEvent::Completed));
    }

    #[tokio::test]
    async fn unauthorized_fails_on_first_attempt() {
        let transport = MockTransport::scripted(vec![status(
            StatusCode::UNAUTHORIZED,
            json!({ "error": "Unauthorized" }),
        )]);
        let sink = RecordingSink::new();
        let coordinator = coordinator(&transport, &sink);

        let error = coordinator
            .submit(GenerationRequest::new("a lighthouse in a storm"))
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::Unauthorized);
        assert_eq!(error.message, "Authentication failed. Please login again.");
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn bad_request_surfaces_validation_issue_message() {
        let transport = MockTransport::scripted(vec![status(
            StatusCode::BAD_REQUEST,
            json!({ "error": { "issues": [{ "message": "Prompt is required" }] } }),
        )]);
        let sink = RecordingSink::new();
        let coordinator = coordinator(&transport, &sink);

        let error = coordinator
            .submit(GenerationRequest::new("a lighthouse in a storm"))
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::InvalidRequest);
        assert_eq!(error.message, "Prompt is required");
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn transport_failure_maps_to_network_error() {
        let transport = MockTransport::scripted(vec![Script::Respond(Err(TransportError {
            message: "connection refused".to_string(),
        }))]);
        let sink = RecordingSink::new();
        let coordinator = coordinator(&transport, &sink);

        let error = coordinator
            .submit(GenerationRequest::new("a lighthouse in a storm"))
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::NetworkError);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn cancel_settles_in_flight_submission_as_cancelled() {
        let transport = MockTransport::scripted(vec![Script::Hang]);
        let sink = RecordingSink::new();
        let coordinator = coordinator(&transport, &sink);

        let task = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move {
                coordinator
                    .submit(GenerationRequest::new("a lighthouse in a storm"))
                    .await
            })
        };

        transport.called.notified().await;
        coordinator.cancel();

        let error = task.await.unwrap().unwrap_err();

        assert_eq!(error.kind, ErrorKind::Cancelled);
        assert_eq!(transport.calls(), 1);
        assert_eq!(sink.events(), vec![ProgressEvent::Cancelled]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_during_backoff_prevents_next_attempt() {
        let transport = MockTransport::scripted(vec![overloaded()]);
        let sink = RecordingSink::new();
        let coordinator = coordinator(&transport, &sink);

        let task = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move {
                coordinator
                    .submit(GenerationRequest::new("a lighthouse in a storm"))
                    .await
            })
        };

        transport.called.notified().await;
        coordinator.cancel();

        let error = task.await.unwrap().unwrap_err();

        assert_eq!(error.kind, ErrorKind::Cancelled);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn second_submit_supersedes_the_first() {
        let generation = sample_generation();
        let transport = MockTransport::scripted(vec![Script::Hang, created(&generation)]);
        let sink = RecordingSink::new();
        let coordinator = coordinator(&transport, &sink);

        let first = {
            let coordinator = coordinator.clone();
            tokio::spawn(async move {
                coordinator
                    .submit(GenerationRequest::new("first prompt"))
                    .await
            })
        };

        transport.called.notified().await;

        let second = coordinator
            .submit(GenerationRequest::new("second prompt"))
            .await
            .unwrap();

        assert_eq!(second, generation);
        assert_eq!(first.await.unwrap().unwrap_err().kind, ErrorKind::Cancelled);
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn cancel_with_nothing_in_flight_is_a_no_op() {
        let transport = MockTransport::scripted(vec![]);
        let sink = RecordingSink::new();
        let coordinator = coordinator(&transport, &sink);

        coordinator.cancel();

        assert_eq!(transport.calls(), 0);
        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn successful_result_passes_through_unmodified() {
        let generation = sample_generation();
        let transport = MockTransport::scripted(vec![created(&generation)]);
        let sink = RecordingSink::new();
        let coordinator = coordinator(&transport, &sink);

        let result = coordinator
            .submit(GenerationRequest::new("a lighthouse in a storm"))
            .await
            .unwrap();

        assert_eq!(result.id, generation.id);
        assert_eq!(result.prompt, generation.prompt);
        assert_eq!(result.style, generation.style);
        assert_eq!(result.image_url, generation.image_url);
        assert_eq!(result.status, generation.status);
        assert_eq!(result.created_at, generation.created_at);
    }
}
