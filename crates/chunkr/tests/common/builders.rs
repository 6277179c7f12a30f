//! Builders for service payloads.

#![allow(dead_code)]

use serde_json::{json, Value};

pub const CREATED_AT: &str = "2024-05-01T10:00:00Z";

/// A job payload with the given id and status and no output.
pub fn job_json(id: &str, status: &str) -> Value {
    json!({
        "task_id": id,
        "status": status,
        "created_at": CREATED_AT,
        "expires_at": "2024-05-02T10:00:00Z",
        "configuration": {
            "file_name": "report.pdf",
            "ocr_strategy": "Auto",
            "pipeline": "Azure",
            "chunk_processing": {
                "ignore_headers_and_footers": true,
                "target_length": 512
            }
        },
        "output": null,
        "task_url": format!("https://api.chunkr.ai/api/v1/task/{}", id)
    })
}

/// A failed job payload carrying a service message.
pub fn failed_job_json(id: &str, message: &str) -> Value {
    let mut job = job_json(id, "Failed");
    job["message"] = json!(message);
    job
}

/// A succeeded job payload with `count` chunks, listed in reverse index order.
pub fn succeeded_with_chunks(id: &str, count: usize) -> Value {
    let chunks: Vec<Value> = (0..count)
        .rev()
        .map(|index| {
            json!({
                "id": format!("{}-chunk-{}", id, index),
                "text": format!("Chunk number {}", index),
                "page": index as u32 + 1,
                "bbox": [0.0, 10.0 * index as f64, 595.0, 10.0 * index as f64 + 8.0],
                "source": { "file_name": "report.pdf", "page": index as u32 + 1 },
                "chunk_index": index
            })
        })
        .collect();

    let mut job = job_json(id, "Succeeded");
    job["output"] = json!({
        "chunks": chunks,
        "metadata": {
            "file_name": "report.pdf",
            "num_pages": count.max(1),
            "language": "en",
            "mime_type": "application/pdf"
        }
    });
    job
}
