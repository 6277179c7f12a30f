use serde::{Deserialize, Serialize};

use super::configuration::{
    ChunkProcessing, OcrStrategy, Pipeline, SegmentProcessing, SegmentationStrategy,
};

/// Default target chunk length, in words.
pub const DEFAULT_TARGET_LENGTH: u32 = 512;

/// How the document is handed to the service. Both variants end up in the
/// same `file` field of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Publicly reachable URL of the document.
    Url(String),
    /// Base64-encoded document bytes.
    Base64(String),
}

impl DocumentSource {
    pub fn kind(&self) -> &'static str {
        match self {
            DocumentSource::Url(_) => "url",
            DocumentSource::Base64(_) => "base64",
        }
    }

    pub fn into_file_field(self) -> String {
        match self {
            DocumentSource::Url(url) => url,
            DocumentSource::Base64(data) => data,
        }
    }
}

/// Optional processing settings for a new job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_strategy: Option<OcrStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_resolution: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<Pipeline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segmentation_strategy: Option<SegmentationStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_processing: Option<ChunkProcessing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_processing: Option<SegmentProcessing>,
}

impl JobOptions {
    /// Settings applied when the caller leaves them out: Auto OCR, Azure
    /// pipeline, headers/footers stripped, 512-word chunks.
    pub fn defaults() -> Self {
        Self {
            ocr_strategy: Some(OcrStrategy::Auto),
            pipeline: Some(Pipeline::Azure),
            chunk_processing: Some(ChunkProcessing {
                ignore_headers_and_footers: Some(true),
                target_length: Some(DEFAULT_TARGET_LENGTH),
            }),
            ..Self::default()
        }
    }

    /// Fills every unset field from `base`. Fields are replaced whole, so an
    /// explicit `chunk_processing` block does not inherit default keys.
    pub fn merge_over(self, base: JobOptions) -> Self {
        Self {
            expires_in: self.expires_in.or(base.expires_in),
            ocr_strategy: self.ocr_strategy.or(base.ocr_strategy),
            high_resolution: self.high_resolution.or(base.high_resolution),
            pipeline: self.pipeline.or(base.pipeline),
            segmentation_strategy: self.segmentation_strategy.or(base.segmentation_strategy),
            chunk_processing: self.chunk_processing.or(base.chunk_processing),
            segment_processing: self.segment_processing.or(base.segment_processing),
        }
    }
}

/// Body of `POST /task/parse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateJobInput {
    /// URL or base64 payload.
    pub file: String,
    pub file_name: String,
    #[serde(flatten)]
    pub options: JobOptions,
}

impl CreateJobInput {
    /// Builds the request with `options` merged over [`JobOptions::defaults`].
    pub fn new(source: DocumentSource, file_name: impl Into<String>, options: JobOptions) -> Self {
        Self {
            file: source.into_file_field(),
            file_name: file_name.into(),
            options: options.merge_over(JobOptions::defaults()),
        }
    }
}

/// Body of `PATCH /task/{id}`. Only these fields can change after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateJobInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_processing: Option<SegmentProcessing>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::configuration::{GenerationStrategy, SegmentRule};
    use serde_json::json;

    #[test]
    fn test_defaults_applied_when_omitted() {
        let input = CreateJobInput::new(
            DocumentSource::Url("https://example.com/doc.pdf".to_string()),
            "doc.pdf",
            JobOptions::default(),
        );

        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "file": "https://example.com/doc.pdf",
                "file_name": "doc.pdf",
                "ocr_strategy": "Auto",
                "pipeline": "Azure",
                "chunk_processing": {
                    "ignore_headers_and_footers": true,
                    "target_length": 512
                }
            })
        );
    }

    #[test]
    fn test_explicit_options_win() {
        let options = JobOptions {
            pipeline: Some(Pipeline::Chunkr),
            high_resolution: Some(true),
            chunk_processing: Some(ChunkProcessing {
                ignore_headers_and_footers: None,
                target_length: Some(1024),
            }),
            ..Default::default()
        };
        let input = CreateJobInput::new(
            DocumentSource::Base64("JVBERi0xLjQK".to_string()),
            "scan.pdf",
            options,
        );

        assert_eq!(input.options.pipeline, Some(Pipeline::Chunkr));
        assert_eq!(input.options.ocr_strategy, Some(OcrStrategy::Auto));
        assert_eq!(input.options.high_resolution, Some(true));
        assert_eq!(
            input.options.chunk_processing,
            Some(ChunkProcessing {
                ignore_headers_and_footers: None,
                target_length: Some(1024),
            })
        );
    }

    #[test]
    fn test_url_and_base64_differ_only_in_file() {
        let options = JobOptions {
            expires_in: Some(3600),
            ..Default::default()
        };
        let from_url = CreateJobInput::new(
            DocumentSource::Url("https://example.com/a.pdf".to_string()),
            "a.pdf",
            options.clone(),
        );
        let from_base64 = CreateJobInput::new(
            DocumentSource::Base64("QUJD".to_string()),
            "a.pdf",
            options,
        );

        assert_ne!(from_url.file, from_base64.file);
        assert_eq!(from_url.file_name, from_base64.file_name);
        assert_eq!(from_url.options, from_base64.options);
    }

    #[test]
    fn test_update_input_omits_unset_fields() {
        let update = UpdateJobInput {
            expires_in: None,
            segment_processing: Some(SegmentProcessing {
                text: Some(SegmentRule {
                    markdown: Some(GenerationStrategy::Auto),
                    llm: Some("Summarize".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
        };

        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({
                "segment_processing": {
                    "Text": { "markdown": "Auto", "llm": "Summarize" }
                }
            })
        );
        assert_eq!(
            serde_json::to_value(UpdateJobInput::default()).unwrap(),
            json!({})
        );
    }
}
