//! Wire types of the Chunkr API.

pub mod configuration;
pub mod input;
pub mod job;
pub mod query;

pub use configuration::{
    ChunkProcessing, Configuration, CroppingStrategy, EmbedSource, GenerationStrategy,
    OcrStrategy, Pipeline, SegmentProcessing, SegmentRule, SegmentationStrategy,
};
pub use input::{CreateJobInput, DocumentSource, JobOptions, UpdateJobInput, DEFAULT_TARGET_LENGTH};
pub use job::{
    Chunk, ChunkSource, DocumentResult, HealthResponse, Job, JobStatus, Metadata, Output,
};
pub use query::{GetJobOptions, ListJobsQuery};
