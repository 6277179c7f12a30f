use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::configuration::Configuration;

/// Lifecycle status of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// Succeeded, Failed and Cancelled never transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Succeeded | JobStatus::Failed | JobStatus::Cancelled
        )
    }

    /// The status exactly as the service spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Starting => "Starting",
            JobStatus::Processing => "Processing",
            JobStatus::Succeeded => "Succeeded",
            JobStatus::Failed => "Failed",
            JobStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Starting" => Ok(JobStatus::Starting),
            "Processing" => Ok(JobStatus::Processing),
            "Succeeded" => Ok(JobStatus::Succeeded),
            "Failed" => Ok(JobStatus::Failed),
            "Cancelled" => Ok(JobStatus::Cancelled),
            other => Err(format!("unknown job status '{}'", other)),
        }
    }
}

/// A job as reported by the service (creation, status check, cancel, update).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub task_id: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub configuration: Configuration,
    /// Only present for succeeded jobs fetched with result inclusion.
    #[serde(default)]
    pub output: Option<Output>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    #[serde(default)]
    pub chunks: Vec<Chunk>,
    pub metadata: Metadata,
}

impl Output {
    /// Chunks sorted by `chunk_index`.
    pub fn chunks_in_order(&self) -> Vec<Chunk> {
        let mut chunks = self.chunks.clone();
        chunks.sort_by_key(|chunk| chunk.chunk_index);
        chunks
    }

    /// True when chunk indices are exactly `0..chunks.len()`.
    pub fn has_dense_indices(&self) -> bool {
        let mut seen = vec![false; self.chunks.len()];
        for chunk in &self.chunks {
            match seen.get_mut(chunk.chunk_index) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }
}

/// One extracted unit of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub text: String,
    pub page: u32,
    /// `[x1, y1, x2, y2]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
    pub source: ChunkSource,
    pub chunk_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSource {
    pub file_name: String,
    pub page: u32,
}

/// Document-level metadata, one per job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub file_name: String,
    pub num_pages: u32,
    pub language: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Result of a complete document flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    pub chunks: Vec<Chunk>,
    pub metadata: Metadata,
    pub job_id: String,
}
