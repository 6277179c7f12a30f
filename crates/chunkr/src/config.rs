use std::time::Duration;

use log::warn;
use secrecy::{ExposeSecret, SecretString};

use crate::secrets::{resolve_secret_optional, Result};

/// Base URL of the hosted service.
pub const DEFAULT_API_URL: &str = "https://api.chunkr.ai/api/v1";

/// Environment variable holding the API key.
pub const API_KEY_ENV_VAR: &str = "CHUNKR_API_KEY";

/// Environment variable naming a file that holds the API key.
pub const API_KEY_FILE_ENV_VAR: &str = "CHUNKR_API_KEY_FILE";

/// Per-request timeout (30 seconds).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connect timeout (10 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`crate::HttpTransport`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub api_key: Option<SecretString>,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Builds a config with the API key taken from the environment.
    ///
    /// `CHUNKR_API_KEY_FILE` wins over `CHUNKR_API_KEY`. A missing or blank
    /// key only logs a warning; the service rejects the first call instead.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_key(None)
    }

    /// Like [`ClientConfig::from_env`], with an explicitly given key taking
    /// priority over both environment sources.
    pub fn from_env_with_key(direct: Option<&str>) -> Result<Self> {
        let key_file = std::env::var(API_KEY_FILE_ENV_VAR).ok();
        let key_var = std::env::var_os(API_KEY_ENV_VAR).map(|_| API_KEY_ENV_VAR);

        let api_key = resolve_secret_optional(direct, key_file.as_deref(), key_var)?
            .filter(|key| !key.expose_secret().trim().is_empty());
        if api_key.is_none() {
            warn!(
                "{} environment variable is not set. Chunkr API calls will fail.",
                API_KEY_ENV_VAR
            );
        }

        Ok(Self {
            api_key,
            ..Self::default()
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
