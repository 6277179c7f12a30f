use crate::types::JobStatus;

/// Receives the status seen on every poll query, in query order.
///
/// Implementations run inline in the poll loop; a panic aborts the poll.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, status: JobStatus, job_id: &str);
}

/// Reporter that ignores every update.
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _status: JobStatus, _job_id: &str) {}
}

impl<F> ProgressReporter for F
where
    F: Fn(JobStatus, &str) + Send + Sync,
{
    fn report(&self, status: JobStatus, job_id: &str) {
        self(status, job_id)
    }
}
