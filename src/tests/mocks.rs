//! Mock implementations for testing

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{MealSnapError, Result};
use crate::transport::{PreparedUpload, Transport, TransportResponse};

/// A request as seen by the mock transport
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub endpoint: String,
    pub api_key: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

#[derive(Debug)]
enum MockOutcome {
    Response(TransportResponse),
    Error(MealSnapError),
}

/// Scripted transport for tests
///
/// Outcomes are consumed in push order; every request (uploads and GETs
/// alike) is recorded for assertions. Clones share the same script and
/// request log.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every response, to give cancellation tests a window
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push_response(&self, status: u16, body: Vec<u8>) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Response(TransportResponse { status, body }));
    }

    pub fn push_error(&self, err: MealSnapError) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Error(err));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn record(&self, request: RecordedRequest) {
        self.requests.lock().unwrap().push(request);
    }

    fn next_outcome(&self) -> Result<TransportResponse> {
        match self.outcomes.lock().unwrap().pop_front() {
            Some(MockOutcome::Response(response)) => Ok(response),
            Some(MockOutcome::Error(err)) => Err(err),
            None => Err(MealSnapError::internal(
                "MockTransport: no scripted outcome left",
            )),
        }
    }
}

impl Transport for MockTransport {
    async fn send(&self, upload: PreparedUpload) -> Result<TransportResponse> {
        self.record(RecordedRequest {
            endpoint: upload.endpoint,
            api_key: upload.api_key,
            content_type: upload.payload.content_type(),
            body: upload.payload.bytes,
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.next_outcome()
    }

    async fn get(&self, endpoint: &str, api_key: &str) -> Result<TransportResponse> {
        self.record(RecordedRequest {
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            content_type: String::new(),
            body: Vec::new(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.next_outcome()
    }
}
