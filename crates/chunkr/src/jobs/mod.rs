//! Job operations on [`crate::ChunkrClient`].

pub mod create;
pub mod flow;
pub mod manage;
pub mod poll;
pub mod progress;
pub mod query;

pub use poll::{PollOptions, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT};
pub use progress::{NoopProgress, ProgressReporter};
pub use query::DEFAULT_RECENT_DAYS;

/// `/task/{id}` plus `suffix`, with the id percent-encoded as a single path
/// segment.
pub(crate) fn task_path(job_id: &str, suffix: &str) -> String {
    format!("/task/{}{}", urlencoding::encode(job_id), suffix)
}
