//! Async client for the Chunkr document processing API.
//!
//! Submit a document, poll it to completion and read back its chunks:
//!
//! ```no_run
//! use chunkr::{ChunkrClient, DocumentSource, JobOptions};
//!
//! # async fn run() -> chunkr::Result<()> {
//! let client = ChunkrClient::from_env()?;
//! let result = client
//!     .run_document_flow(
//!         DocumentSource::Url("https://example.com/report.pdf".to_string()),
//!         "report.pdf",
//!         JobOptions::default(),
//!     )
//!     .await?;
//! println!("{} chunks", result.chunks.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod jobs;
pub mod secrets;
pub mod transport;
pub mod types;

pub use client::ChunkrClient;
pub use config::{ClientConfig, API_KEY_ENV_VAR, API_KEY_FILE_ENV_VAR, DEFAULT_API_URL};
pub use error::{ChunkrError, Result, TransportError};
pub use jobs::{
    NoopProgress, PollOptions, ProgressReporter, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT,
    DEFAULT_RECENT_DAYS,
};
pub use secrets::SecretError;
pub use transport::{ApiRequest, HttpTransport, Transport};
pub use types::{
    Chunk, ChunkProcessing, ChunkSource, Configuration, CreateJobInput, DocumentResult,
    DocumentSource, GetJobOptions, HealthResponse, Job, JobOptions, JobStatus, ListJobsQuery,
    Metadata, OcrStrategy, Output, Pipeline, SegmentProcessing, SegmentRule, UpdateJobInput,
};
