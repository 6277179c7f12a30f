use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::Value;

use super::{ApiRequest, Transport};
use crate::config::ClientConfig;
use crate::error::TransportError;

/// Maximum length of a non-JSON error body kept in errors and logs.
const MAX_ERROR_BODY_LENGTH: usize = 200;

fn truncate_body(body: &str) -> String {
    if body.len() > MAX_ERROR_BODY_LENGTH {
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated)", &body[..end])
    } else {
        body.to_string()
    }
}

/// Decodes an error body: JSON when it parses, otherwise the (truncated) text.
fn decode_error_body(bytes: &[u8]) -> Option<Value> {
    if bytes.is_empty() {
        return None;
    }
    serde_json::from_slice(bytes).ok().or_else(|| {
        let text = String::from_utf8_lossy(bytes);
        let text = text.trim();
        (!text.is_empty()).then(|| Value::String(truncate_body(text)))
    })
}

/// `reqwest`-backed transport with bearer authentication.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        match &config.api_key {
            Some(key) => {
                let mut value =
                    HeaderValue::from_str(&format!("Bearer {}", key.expose_secret())).map_err(
                        |e| TransportError::Setup(format!("Invalid API key header value: {}", e)),
                    )?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            None => warn!("No Chunkr API key configured; requests will be unauthenticated"),
        }

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TransportError::Setup(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let ApiRequest {
            method,
            path,
            query,
            body,
        } = request;
        let url = format!("{}{}", self.base_url, path);

        debug!("Chunkr API request: {} {}", method, path);

        let mut builder = self.client.request(method.clone(), &url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(source) => {
                error!(
                    "Chunkr API no response: endpoint={} method={}: {}",
                    path, method, source
                );
                return Err(TransportError::Network {
                    method,
                    path,
                    source,
                });
            }
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(source) => {
                error!(
                    "Chunkr API response body unreadable: endpoint={} method={}: {}",
                    path, method, source
                );
                return Err(TransportError::Network {
                    method,
                    path,
                    source,
                });
            }
        };

        if !status.is_success() {
            let body = decode_error_body(&bytes);
            error!(
                "Chunkr API error: status={} endpoint={} method={} data={}",
                status.as_u16(),
                path,
                method,
                body.as_ref().map(Value::to_string).unwrap_or_default()
            );
            return Err(TransportError::Status {
                method,
                path,
                status: status.as_u16(),
                body,
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|source| TransportError::Decode {
            method,
            path,
            source,
        })
    }
}
