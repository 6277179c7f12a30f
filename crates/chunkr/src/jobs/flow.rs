//! End-to-end document flow: submit, poll, extract.

use log::{info, warn};

use super::poll::PollOptions;
use crate::client::ChunkrClient;
use crate::error::{ChunkrError, Result};
use crate::types::{DocumentResult, DocumentSource, Job, JobOptions, JobStatus};

impl ChunkrClient {
    /// Submits a document, waits for it with default polling settings and
    /// returns its chunks and metadata.
    pub async fn run_document_flow(
        &self,
        source: DocumentSource,
        file_name: &str,
        options: JobOptions,
    ) -> Result<DocumentResult> {
        self.run_document_flow_with(source, file_name, options, &PollOptions::default())
            .await
    }

    /// [`ChunkrClient::run_document_flow`] with explicit polling settings.
    ///
    /// Submission, query and timeout errors are returned unchanged. A Failed
    /// or Cancelled job, or a Succeeded job without output, becomes
    /// [`ChunkrError::Flow`].
    pub async fn run_document_flow_with(
        &self,
        source: DocumentSource,
        file_name: &str,
        options: JobOptions,
        poll: &PollOptions,
    ) -> Result<DocumentResult> {
        let job = self.create_job_from_source(source, file_name, options).await?;
        let job_id = job.task_id;

        let completed = match self.poll_job(&job_id, poll).await {
            Ok(completed) => completed,
            Err(ChunkrError::JobFailed { message, .. }) => {
                return Err(flow_error(&job_id, terminal_reason(JobStatus::Failed, message)))
            }
            Err(ChunkrError::JobCancelled { .. }) => {
                return Err(flow_error(&job_id, terminal_reason(JobStatus::Cancelled, None)))
            }
            Err(e) => return Err(e),
        };

        let result = extract_result(&job_id, completed)?;
        info!(
            "Chunkr document flow finished for task {}: {} chunks, {} pages",
            result.job_id,
            result.chunks.len(),
            result.metadata.num_pages
        );
        Ok(result)
    }
}

fn flow_error(job_id: &str, reason: String) -> ChunkrError {
    ChunkrError::Flow {
        job_id: job_id.to_string(),
        reason,
    }
}

fn terminal_reason(status: JobStatus, message: Option<String>) -> String {
    match message {
        Some(message) if !message.is_empty() => {
            format!("task ended with status {}: {}", status, message)
        }
        _ => format!("task ended with status {}", status),
    }
}

fn extract_result(job_id: &str, job: Job) -> Result<DocumentResult> {
    if job.status != JobStatus::Succeeded {
        return Err(flow_error(job_id, terminal_reason(job.status, job.message)));
    }
    let output = job
        .output
        .ok_or_else(|| flow_error(job_id, "task succeeded but has no output".to_string()))?;

    if !output.has_dense_indices() {
        warn!(
            "Chunkr task {} returned chunk indices that are not 0..{}",
            job_id,
            output.chunks.len()
        );
    }

    Ok(DocumentResult {
        chunks: output.chunks_in_order(),
        metadata: output.metadata,
        job_id: job.task_id,
    })
}
