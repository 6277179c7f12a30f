//! Scripted transport for driving the client without a network.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tokio::time::Instant;

use chunkr::{ApiRequest, ChunkrClient, Transport, TransportError};

type Responder = Box<dyn Fn(&ApiRequest) -> Result<Value, TransportError> + Send + Sync>;

/// A request as seen by the transport, with the (tokio) time it arrived.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub request: ApiRequest,
    pub at: Instant,
}

/// Replays queued responses in order, then falls back to an optional
/// responder. Fails loudly with a setup error when both are exhausted.
pub struct ScriptedTransport {
    queue: Mutex<VecDeque<Result<Value, TransportError>>>,
    fallback: Option<Responder>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answers every request not covered by the queue with `responder`.
    pub fn with_fallback<F>(mut self, responder: F) -> Self
    where
        F: Fn(&ApiRequest) -> Result<Value, TransportError> + Send + Sync + 'static,
    {
        self.fallback = Some(Box::new(responder));
        self
    }

    pub fn respond(self, value: Value) -> Self {
        self.queue.lock().unwrap().push_back(Ok(value));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.queue.lock().unwrap().push_back(Err(error));
        self
    }

    /// Queues a non-2xx answer for `method path`.
    pub fn fail_status(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.fail(TransportError::Status {
            method,
            path: path.to_string(),
            status,
            body: Some(body),
        })
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// `include_chunks` parameter of every recorded request, in order.
    pub fn include_chunks_flags(&self) -> Vec<Option<String>> {
        self.requests()
            .iter()
            .map(|r| r.request.query_param("include_chunks").map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            request: request.clone(),
            at: Instant::now(),
        });

        if let Some(response) = self.queue.lock().unwrap().pop_front() {
            return response;
        }
        match &self.fallback {
            Some(responder) => responder(&request),
            None => Err(TransportError::Setup(format!(
                "script exhausted at {} {}",
                request.method, request.path
            ))),
        }
    }
}

/// Builds a client over `transport`, keeping a handle for assertions.
pub fn client_with(transport: ScriptedTransport) -> (ChunkrClient, Arc<ScriptedTransport>) {
    let transport = Arc::new(transport);
    let client = ChunkrClient::with_transport(transport.clone());
    (client, transport)
}
