use serde::{Deserialize, Serialize};

/// Processing options a job was created or updated with, as echoed back by
/// the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub file_name: Option<String>,
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OcrStrategy {
    Auto,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pipeline {
    Azure,
    Chunkr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentationStrategy {
    LayoutAnalysis,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkProcessing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_headers_and_footers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_length: Option<u32>,
}

/// Per segment type processing rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentProcessing {
    #[serde(rename = "Text", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<SegmentRule>,
    #[serde(rename = "Table", default, skip_serializing_if = "Option::is_none")]
    pub table: Option<SegmentRule>,
    #[serde(rename = "Formula", default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<SegmentRule>,
    #[serde(rename = "Picture", default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<SegmentRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<GenerationStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<GenerationStrategy>,
    /// Custom LLM prompt for this segment type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_image: Option<CroppingStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_sources: Option<Vec<EmbedSource>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationStrategy {
    #[serde(rename = "LLM")]
    Llm,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CroppingStrategy {
    All,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmbedSource {
    #[serde(rename = "HTML")]
    Html,
    Markdown,
    #[serde(rename = "LLM")]
    Llm,
    Content,
}
