//! Polling a job until it reaches a terminal status.
//!
//! Status checks are made without result inclusion. Once a query reports
//! `Succeeded`, the same job is fetched one more time with results (no sleep
//! in between), so the potentially large output crosses the wire exactly
//! once. The deadline is checked before every query: a query in flight may
//! finish, but none is started past the deadline.

use std::time::Duration;

use log::{debug, info, warn};
use tokio::time::Instant;
use tracing::Instrument;

use super::progress::{NoopProgress, ProgressReporter};
use crate::client::ChunkrClient;
use crate::error::{ChunkrError, Result};
use crate::types::{GetJobOptions, Job, JobStatus};

/// Default delay between consecutive status checks (1 second).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Default limit on total polling time (15 minutes).
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub poll_interval: Duration,
    pub timeout: Duration,
    /// Forwarded as `base64_urls` on every query.
    pub base64_urls: Option<bool>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
            base64_urls: None,
        }
    }
}

impl PollOptions {
    pub fn with_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// What the loop does after looking at one query result.
enum Step {
    /// Terminal success with results; stop.
    Done(Job),
    /// Succeeded but fetched without results; query again right away.
    FetchResult,
    /// Non-terminal; sleep, then query again.
    Wait,
}

fn evaluate(job_id: &str, job: Job, result_requested: bool) -> Result<Step> {
    match job.status {
        JobStatus::Succeeded if !result_requested => Ok(Step::FetchResult),
        JobStatus::Succeeded => {
            if job.output.is_none() {
                warn!(
                    "Chunkr task {} succeeded but the service returned no output",
                    job_id
                );
            }
            Ok(Step::Done(job))
        }
        JobStatus::Failed => Err(ChunkrError::JobFailed {
            job_id: job_id.to_string(),
            message: job.message,
        }),
        JobStatus::Cancelled => Err(ChunkrError::JobCancelled {
            job_id: job_id.to_string(),
        }),
        JobStatus::Starting | JobStatus::Processing => Ok(Step::Wait),
    }
}

impl ChunkrClient {
    /// Polls `job_id` until it succeeds, fails, is cancelled or `options.timeout`
    /// elapses. Returns the job fetched with results on success.
    pub async fn poll_job(&self, job_id: &str, options: &PollOptions) -> Result<Job> {
        self.poll_job_with_progress(job_id, options, &NoopProgress)
            .await
    }

    /// Like [`ChunkrClient::poll_job`], reporting the status of every query.
    pub async fn poll_job_with_progress(
        &self,
        job_id: &str,
        options: &PollOptions,
        progress: &dyn ProgressReporter,
    ) -> Result<Job> {
        let span = tracing::info_span!("chunkr.poll", job_id = %job_id);
        self.run_poll(job_id, options, progress)
            .instrument(span)
            .await
    }

    async fn run_poll(
        &self,
        job_id: &str,
        options: &PollOptions,
        progress: &dyn ProgressReporter,
    ) -> Result<Job> {
        let start = Instant::now();
        let mut result_requested = false;
        let mut queries: u32 = 0;

        loop {
            let elapsed = start.elapsed();
            if elapsed > options.timeout {
                warn!(
                    "Polling Chunkr task {} timed out after {:?} ({} queries)",
                    job_id, elapsed, queries
                );
                return Err(ChunkrError::PollTimeout {
                    job_id: job_id.to_string(),
                    elapsed,
                });
            }

            let query = GetJobOptions {
                base64_urls: options.base64_urls,
                ..if result_requested {
                    GetJobOptions::with_result()
                } else {
                    GetJobOptions::status_only()
                }
            };
            let job = self.get_job(job_id, &query).await?;
            queries += 1;

            debug!(
                "Chunkr task {} status: {} (query {}, results: {})",
                job_id, job.status, queries, result_requested
            );
            progress.report(job.status, job_id);

            match evaluate(job_id, job, result_requested)? {
                Step::Done(job) => {
                    info!(
                        "Chunkr task {} succeeded after {:?} ({} queries)",
                        job_id,
                        start.elapsed(),
                        queries
                    );
                    return Ok(job);
                }
                Step::FetchResult => {
                    result_requested = true;
                }
                Step::Wait => {
                    tokio::time::sleep(options.poll_interval).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn job(status: JobStatus) -> Job {
        Job {
            task_id: "job-1".to_string(),
            status,
            created_at: Utc::now(),
            expires_at: None,
            configuration: Default::default(),
            output: None,
            started_at: None,
            finished_at: None,
            message: Some("details".to_string()),
            task_url: None,
        }
    }

    #[test]
    fn test_default_options() {
        let options = PollOptions::default();
        assert_eq!(options.poll_interval, Duration::from_secs(1));
        assert_eq!(options.timeout, Duration::from_secs(900));
        assert!(options.base64_urls.is_none());
    }

    #[test]
    fn test_non_terminal_waits() {
        for status in [JobStatus::Starting, JobStatus::Processing] {
            assert!(matches!(
                evaluate("job-1", job(status), false),
                Ok(Step::Wait)
            ));
            assert!(matches!(
                evaluate("job-1", job(status), true),
                Ok(Step::Wait)
            ));
        }
    }

    #[test]
    fn test_success_without_results_refetches() {
        assert!(matches!(
            evaluate("job-1", job(JobStatus::Succeeded), false),
            Ok(Step::FetchResult)
        ));
        assert!(matches!(
            evaluate("job-1", job(JobStatus::Succeeded), true),
            Ok(Step::Done(_))
        ));
    }

    #[test]
    fn test_failure_statuses() {
        match evaluate("job-1", job(JobStatus::Failed), false) {
            Err(ChunkrError::JobFailed { job_id, message }) => {
                assert_eq!(job_id, "job-1");
                assert_eq!(message.as_deref(), Some("details"));
            }
            _ => panic!("expected JobFailed"),
        }
        assert!(matches!(
            evaluate("job-1", job(JobStatus::Cancelled), true),
            Err(ChunkrError::JobCancelled { .. })
        ));
    }
}
