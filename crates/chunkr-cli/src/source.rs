//! Turning a `<file>` argument into a document source.

use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use chunkr::DocumentSource;

pub fn is_url(file: &str) -> bool {
    file.starts_with("http://") || file.starts_with("https://")
}

/// URLs are passed through; anything else is read from disk and
/// base64-encoded.
pub fn resolve(file: &str) -> Result<DocumentSource> {
    if is_url(file) {
        return Ok(DocumentSource::Url(file.to_string()));
    }

    let bytes =
        std::fs::read(file).with_context(|| format!("Failed to read document '{}'", file))?;
    Ok(DocumentSource::Base64(STANDARD.encode(bytes)))
}

/// Name sent with the job when `--name` is not given: the last path
/// segment of the URL or file.
pub fn default_file_name(file: &str) -> String {
    if is_url(file) {
        let without_query = file.split(['?', '#']).next().unwrap_or(file);
        return without_query
            .split_once("://")
            .and_then(|(_, rest)| rest.split_once('/'))
            .and_then(|(_, path)| path.trim_end_matches('/').rsplit('/').next())
            .filter(|segment| !segment.is_empty())
            .unwrap_or("document")
            .to_string();
    }

    Path::new(file)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}
