//! Single-shot lifecycle operations: cancel, update, delete and health.
//!
//! None of these check the job's state locally; the service decides.

use log::info;

use super::task_path;
use crate::client::ChunkrClient;
use crate::error::{ChunkrError, Result, TransportError};
use crate::transport::ApiRequest;
use crate::types::{HealthResponse, Job, UpdateJobInput};

impl ChunkrClient {
    /// Requests cancellation. Only Starting/Processing jobs can be cancelled;
    /// the service rejects the rest with an error status.
    pub async fn cancel_job(&self, job_id: &str) -> Result<Job> {
        let job: Job = self
            .call(ApiRequest::get(task_path(job_id, "/cancel")))
            .await
            .map_err(|source| ChunkrError::Cancel {
                job_id: job_id.to_string(),
                source,
            })?;

        info!("Cancelled Chunkr task {} (status: {})", job_id, job.status);
        Ok(job)
    }

    /// Updates segment processing rules or expiry of a job.
    pub async fn update_job(&self, job_id: &str, update: &UpdateJobInput) -> Result<Job> {
        let wrap = |source| ChunkrError::Update {
            job_id: job_id.to_string(),
            source,
        };

        let body = serde_json::to_value(update).map_err(|e| {
            wrap(TransportError::Setup(format!(
                "Failed to encode job update: {}",
                e
            )))
        })?;

        self.call(ApiRequest::patch(task_path(job_id, "")).with_body(body))
            .await
            .map_err(wrap)
    }

    /// Removes a job from the service.
    pub async fn delete_job(&self, job_id: &str) -> Result<()> {
        self.call_unit(ApiRequest::delete(task_path(job_id, "")))
            .await
            .map_err(|source| ChunkrError::Delete {
                job_id: job_id.to_string(),
                source,
            })?;

        info!("Deleted Chunkr task {}", job_id);
        Ok(())
    }

    /// Probes service health.
    pub async fn check_health(&self) -> Result<HealthResponse> {
        self.call(ApiRequest::get("/health"))
            .await
            .map_err(|source| ChunkrError::HealthCheck { source })
    }
}
