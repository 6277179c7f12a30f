//! Job submission.

use log::{debug, info};

use crate::client::ChunkrClient;
use crate::error::{ChunkrError, Result, TransportError};
use crate::transport::ApiRequest;
use crate::types::{CreateJobInput, DocumentSource, Job, JobOptions};

impl ChunkrClient {
    /// Submits a new job. The input is sent as is; use [`CreateJobInput::new`]
    /// to get the documented defaults.
    pub async fn create_job(&self, input: &CreateJobInput) -> Result<Job> {
        let body = serde_json::to_value(input).map_err(|e| ChunkrError::Submission {
            source: TransportError::Setup(format!("Failed to encode job input: {}", e)),
        })?;

        let job: Job = self
            .call(ApiRequest::post("/task/parse").with_body(body))
            .await
            .map_err(|source| ChunkrError::Submission { source })?;

        info!(
            "Created Chunkr task {} for '{}' (status: {})",
            job.task_id, input.file_name, job.status
        );
        Ok(job)
    }

    /// Submits a document by reference, with `options` merged over the defaults.
    pub async fn create_job_from_source(
        &self,
        source: DocumentSource,
        file_name: &str,
        options: JobOptions,
    ) -> Result<Job> {
        debug!("Submitting '{}' as {}", file_name, source.kind());
        self.create_job(&CreateJobInput::new(source, file_name, options))
            .await
    }

    /// Submits a publicly reachable document URL.
    pub async fn create_job_from_url(
        &self,
        file_url: &str,
        file_name: &str,
        options: JobOptions,
    ) -> Result<Job> {
        self.create_job_from_source(DocumentSource::Url(file_url.to_string()), file_name, options)
            .await
    }

    /// Submits base64-encoded document bytes.
    pub async fn create_job_from_base64(
        &self,
        base64_content: &str,
        file_name: &str,
        options: JobOptions,
    ) -> Result<Job> {
        self.create_job_from_source(
            DocumentSource::Base64(base64_content.to_string()),
            file_name,
            options,
        )
        .await
    }
}
