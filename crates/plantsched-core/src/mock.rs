//! Mock extraction backend for testing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::ExtractError;
use crate::backend::ExtractionBackend;

/// A configurable mock response for [`MockBackend`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Simulate a successful upstream body.
    Success(serde_json::Value),
    /// Simulate a non-2xx upstream status with body text.
    Upstream { status: u16, message: String },
    /// Simulate a transport-level failure.
    Error(String),
}

/// A hand-rolled mock implementing [`ExtractionBackend`] for tests.
///
/// Supports:
/// - A fixed response (used for every call), **or**
/// - A sequence of responses (one per call, cycling the last if exhausted).
/// - Optional per-call latency.
/// - Call counting via [`call_count()`](MockBackend::call_count).
pub struct MockBackend {
    /// If non-empty, each call pops the next response (last is repeated if exhausted).
    responses: Mutex<Vec<MockResponse>>,
    /// Fallback when the sequence is empty (or single-response mode).
    fallback: MockResponse,
    delay: Option<Duration>,
    call_count: AtomicUsize,
}

impl MockBackend {
    /// Create a mock that always returns `response`.
    pub fn new(response: MockResponse) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            fallback: response,
            delay: None,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Create a mock that returns responses in order, repeating the last one.
    pub fn with_sequence(mut responses: Vec<MockResponse>) -> Self {
        assert!(
            !responses.is_empty(),
            "sequence must have at least one response"
        );
        // Reverse so we can pop() from the front cheaply.
        responses.reverse();
        let fallback = responses.first().cloned().unwrap();
        Self {
            responses: Mutex::new(responses),
            fallback,
            delay: None,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Set simulated network latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times `extract()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn next_response(&self) -> MockResponse {
        let mut seq = self.responses.lock().unwrap();
        if let Some(resp) = seq.pop() {
            resp
        } else {
            self.fallback.clone()
        }
    }
}

impl ExtractionBackend for MockBackend {
    fn extract<'a>(
        &'a self,
        _pdf_base64: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, ExtractError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let response = self.next_response();
        let delay = self.delay;

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }

            match response {
                MockResponse::Success(body) => Ok(body),
                MockResponse::Upstream { status, message } => {
                    Err(ExtractError::Upstream { status, message })
                }
                MockResponse::Error(msg) => Err(ExtractError::Other(msg)),
            }
        })
    }
}
