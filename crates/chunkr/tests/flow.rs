//! Submit, poll and extract in one call.

mod common;

use std::time::Duration;

use reqwest::Method;
use serde_json::json;

use chunkr::{ChunkrError, DocumentSource, JobOptions, PollOptions};
use common::{client_with, failed_job_json, job_json, succeeded_with_chunks, ScriptedTransport};

fn fast_poll() -> PollOptions {
    PollOptions::default().with_interval(Duration::from_millis(10))
}

fn url_source() -> DocumentSource {
    DocumentSource::Url("https://example.com/report.pdf".to_string())
}

#[tokio::test(start_paused = true)]
async fn test_flow_returns_chunks_in_index_order() {
    let (client, transport) = client_with(
        ScriptedTransport::new()
            .respond(job_json("job-1", "Starting"))
            .respond(job_json("job-1", "Processing"))
            .respond(job_json("job-1", "Succeeded"))
            .respond(succeeded_with_chunks("job-1", 4)),
    );

    let result = client
        .run_document_flow_with(url_source(), "report.pdf", JobOptions::default(), &fast_poll())
        .await
        .unwrap();

    assert_eq!(result.job_id, "job-1");
    assert_eq!(result.metadata.num_pages, 4);
    let indices: Vec<usize> = result.chunks.iter().map(|c| c.chunk_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert_eq!(result.chunks[0].text, "Chunk number 0");

    let requests = transport.requests();
    assert_eq!(requests[0].request.method, Method::POST);
    assert_eq!(requests[0].request.path, "/task/parse");
    assert!(requests[1..]
        .iter()
        .all(|r| r.request.path == "/task/job-1"));
    assert_eq!(transport.request_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_flow_base64_source() {
    let (client, transport) = client_with(
        ScriptedTransport::new()
            .respond(job_json("job-2", "Succeeded"))
            .respond(job_json("job-2", "Succeeded"))
            .respond(succeeded_with_chunks("job-2", 1)),
    );

    let result = client
        .run_document_flow_with(
            DocumentSource::Base64("JVBERi0xLjcK".to_string()),
            "scan.pdf",
            JobOptions::default(),
            &fast_poll(),
        )
        .await
        .unwrap();

    assert_eq!(result.chunks.len(), 1);
    let body = transport.requests()[0].request.body.clone().unwrap();
    assert_eq!(body["file"], json!("JVBERi0xLjcK"));
    assert_eq!(body["file_name"], json!("scan.pdf"));
}

#[tokio::test(start_paused = true)]
async fn test_failed_job_becomes_flow_error() {
    let (client, _transport) = client_with(
        ScriptedTransport::new()
            .respond(job_json("job-3", "Starting"))
            .respond(failed_job_json("job-3", "Unsupported file type")),
    );

    let err = client
        .run_document_flow_with(url_source(), "report.pdf", JobOptions::default(), &fast_poll())
        .await
        .unwrap_err();

    assert!(matches!(err, ChunkrError::Flow { .. }));
    assert_eq!(err.job_id(), Some("job-3"));
    assert_eq!(
        err.to_string(),
        "Chunkr document flow failed for task 'job-3': task ended with status Failed: Unsupported file type"
    );
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_job_becomes_flow_error() {
    let (client, _transport) = client_with(
        ScriptedTransport::new()
            .respond(job_json("job-4", "Starting"))
            .respond(job_json("job-4", "Cancelled")),
    );

    let err = client
        .run_document_flow_with(url_source(), "report.pdf", JobOptions::default(), &fast_poll())
        .await
        .unwrap_err();

    match err {
        ChunkrError::Flow { job_id, reason } => {
            assert_eq!(job_id, "job-4");
            assert_eq!(reason, "task ended with status Cancelled");
        }
        other => panic!("expected Flow error, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_success_without_output_becomes_flow_error() {
    let (client, transport) = client_with(
        ScriptedTransport::new()
            .respond(job_json("job-5", "Starting"))
            .respond(job_json("job-5", "Succeeded"))
            .respond(job_json("job-5", "Succeeded")),
    );

    let err = client
        .run_document_flow_with(url_source(), "report.pdf", JobOptions::default(), &fast_poll())
        .await
        .unwrap_err();

    assert!(matches!(err, ChunkrError::Flow { ref reason, .. } if reason.contains("no output")));
    assert_eq!(transport.request_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_submission_error_passes_through() {
    let (client, transport) = client_with(ScriptedTransport::new().fail_status(
        Method::POST,
        "/task/parse",
        413,
        json!({"message": "File too large"}),
    ));

    let err = client
        .run_document_flow_with(url_source(), "report.pdf", JobOptions::default(), &fast_poll())
        .await
        .unwrap_err();

    assert!(matches!(err, ChunkrError::Submission { .. }));
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_query_error_passes_through() {
    let (client, _transport) = client_with(
        ScriptedTransport::new()
            .respond(job_json("job-6", "Starting"))
            .fail_status(Method::GET, "/task/job-6", 503, json!("unavailable")),
    );

    let err = client
        .run_document_flow_with(url_source(), "report.pdf", JobOptions::default(), &fast_poll())
        .await
        .unwrap_err();

    assert!(matches!(err, ChunkrError::Query { ref job_id, .. } if job_id == "job-6"));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_passes_through() {
    let (client, _transport) = client_with(
        ScriptedTransport::new()
            .respond(job_json("job-7", "Starting"))
            .with_fallback(|_| Ok(job_json("job-7", "Processing"))),
    );
    let poll = PollOptions::default()
        .with_interval(Duration::from_secs(1))
        .with_timeout(Duration::from_secs(3));

    let err = client
        .run_document_flow_with(url_source(), "report.pdf", JobOptions::default(), &poll)
        .await
        .unwrap_err();

    assert!(matches!(err, ChunkrError::PollTimeout { ref job_id, .. } if job_id == "job-7"));
}
