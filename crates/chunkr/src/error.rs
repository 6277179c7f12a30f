use std::time::Duration;

use reqwest::Method;
use thiserror::Error;

use crate::secrets::SecretError;

/// Failure of a single HTTP exchange with the service.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request was sent but no response came back.
    #[error("No response from {method} {path}: {source}")]
    Network {
        method: Method,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-2xx status.
    #[error("{method} {path} returned HTTP {status}{}", describe_body(.body))]
    Status {
        method: Method,
        path: String,
        status: u16,
        body: Option<serde_json::Value>,
    },

    /// The service answered 2xx but the body did not have the expected shape.
    #[error("Malformed response from {method} {path}: {source}")]
    Decode {
        method: Method,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Building the client or the request failed before anything was sent.
    #[error("Request setup failed: {0}")]
    Setup(String),
}

fn describe_body(body: &Option<serde_json::Value>) -> String {
    match body {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(text)) => format!(": {}", text),
        Some(value) => format!(": {}", value),
    }
}

impl TransportError {
    /// HTTP status code, when the service produced one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Network { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the service reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

#[derive(Error, Debug)]
pub enum ChunkrError {
    #[error("Chunkr task creation failed: {source}")]
    Submission {
        #[source]
        source: TransportError,
    },

    #[error("Failed to get Chunkr task '{job_id}': {source}")]
    Query {
        job_id: String,
        #[source]
        source: TransportError,
    },

    #[error("Failed to list Chunkr tasks: {source}")]
    List {
        #[source]
        source: TransportError,
    },

    #[error("Failed to cancel Chunkr task '{job_id}': {source}")]
    Cancel {
        job_id: String,
        #[source]
        source: TransportError,
    },

    #[error("Failed to update Chunkr task '{job_id}': {source}")]
    Update {
        job_id: String,
        #[source]
        source: TransportError,
    },

    #[error("Failed to delete Chunkr task '{job_id}': {source}")]
    Delete {
        job_id: String,
        #[source]
        source: TransportError,
    },

    #[error("Chunkr health check failed: {source}")]
    HealthCheck {
        #[source]
        source: TransportError,
    },

    #[error("Polling timed out after {}ms for task '{job_id}'", .elapsed.as_millis())]
    PollTimeout { job_id: String, elapsed: Duration },

    #[error("Chunkr task '{job_id}' failed{}", describe_message(.message))]
    JobFailed {
        job_id: String,
        message: Option<String>,
    },

    #[error("Chunkr task '{job_id}' was cancelled")]
    JobCancelled { job_id: String },

    #[error("Chunkr document flow failed for task '{job_id}': {reason}")]
    Flow { job_id: String, reason: String },

    #[error("Chunkr client setup failed: {source}")]
    Setup {
        #[source]
        source: TransportError,
    },

    #[error("Credential error: {0}")]
    Secret(#[from] SecretError),
}

fn describe_message(message: &Option<String>) -> String {
    match message.as_deref() {
        Some(text) if !text.is_empty() => format!(": {}", text),
        _ => String::new(),
    }
}

impl ChunkrError {
    /// The job this error is about, if any.
    pub fn job_id(&self) -> Option<&str> {
        match self {
            ChunkrError::Query { job_id, .. }
            | ChunkrError::Cancel { job_id, .. }
            | ChunkrError::Update { job_id, .. }
            | ChunkrError::Delete { job_id, .. }
            | ChunkrError::PollTimeout { job_id, .. }
            | ChunkrError::JobFailed { job_id, .. }
            | ChunkrError::JobCancelled { job_id }
            | ChunkrError::Flow { job_id, .. } => Some(job_id),
            _ => None,
        }
    }

    /// The underlying transport failure, for errors caused by one.
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            ChunkrError::Submission { source }
            | ChunkrError::Setup { source }
            | ChunkrError::List { source }
            | ChunkrError::HealthCheck { source }
            | ChunkrError::Query { source, .. }
            | ChunkrError::Cancel { source, .. }
            | ChunkrError::Update { source, .. }
            | ChunkrError::Delete { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChunkrError>;
