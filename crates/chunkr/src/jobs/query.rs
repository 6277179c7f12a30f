//! Fetching and listing jobs.

use chrono::{Duration, Utc};

use super::task_path;
use crate::client::ChunkrClient;
use crate::error::{ChunkrError, Result, TransportError};
use crate::transport::ApiRequest;
use crate::types::{GetJobOptions, Job, JobStatus, ListJobsQuery};

/// Look-back window of [`ChunkrClient::recent_jobs`] when callers have no preference.
pub const DEFAULT_RECENT_DAYS: i64 = 7;

impl ChunkrClient {
    /// Fetches the current state of a job.
    ///
    /// `output` is only populated for succeeded jobs when
    /// `options.include_result` is set. An unknown id fails with a
    /// `Query` error whose transport status is 404.
    pub async fn get_job(&self, job_id: &str, options: &GetJobOptions) -> Result<Job> {
        let request = ApiRequest::get(task_path(job_id, ""))
            .with_query(options.to_query_pairs());

        self.call(request)
            .await
            .map_err(|source| ChunkrError::Query {
                job_id: job_id.to_string(),
                source,
            })
    }

    /// Lists jobs with filtering and pagination.
    pub async fn list_jobs(&self, query: &ListJobsQuery) -> Result<Vec<Job>> {
        let request = ApiRequest::get("/tasks").with_query(query.to_query_pairs());

        self.call(request)
            .await
            .map_err(|source| ChunkrError::List { source })
    }

    /// Lists jobs created within the last `days` days. Any start/end on
    /// `query` is replaced.
    ///
    /// A negative `days`, or one reaching past the representable date range,
    /// fails with a `List` error before anything is sent.
    pub async fn recent_jobs(&self, days: i64, query: &ListJobsQuery) -> Result<Vec<Job>> {
        let end = Utc::now();
        let start = Duration::try_days(days)
            .filter(|_| days >= 0)
            .and_then(|window| end.checked_sub_signed(window))
            .ok_or_else(|| ChunkrError::List {
                source: TransportError::Setup(format!(
                    "invalid look-back window of {} days",
                    days
                )),
            })?;

        let query = ListJobsQuery {
            start: Some(start),
            end: Some(end),
            ..query.clone()
        };
        self.list_jobs(&query).await
    }

    /// Lists jobs and keeps those in `status`, in listing order.
    pub async fn jobs_by_status(&self, status: JobStatus, query: &ListJobsQuery) -> Result<Vec<Job>> {
        let jobs = self.list_jobs(query).await?;
        Ok(jobs.into_iter().filter(|job| job.status == status).collect())
    }
}
