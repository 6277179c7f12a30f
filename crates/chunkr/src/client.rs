use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ChunkrError, Result, TransportError};
use crate::transport::{ApiRequest, HttpTransport, Transport};

/// Handle to the Chunkr API.
///
/// Cloning is cheap; clones share one transport, so a single client can
/// drive any number of concurrent polls.
#[derive(Clone)]
pub struct ChunkrClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ChunkrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkrClient").finish_non_exhaustive()
    }
}

impl ChunkrClient {
    /// Creates a client over HTTP with the given settings.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport =
            HttpTransport::new(config).map_err(|source| ChunkrError::Setup { source })?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Creates a client with the API key taken from the environment.
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        Self::new(&config)
    }

    /// Creates a client over an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Executes a request and decodes the JSON body into `R`.
    pub(crate) async fn call<R>(&self, request: ApiRequest) -> std::result::Result<R, TransportError>
    where
        R: DeserializeOwned,
    {
        let method = request.method.clone();
        let path = request.path.clone();
        let value = self.transport.execute(request).await?;
        serde_json::from_value(value).map_err(|source| TransportError::Decode {
            method,
            path,
            source,
        })
    }

    /// Executes a request whose response body carries nothing of interest.
    pub(crate) async fn call_unit(
        &self,
        request: ApiRequest,
    ) -> std::result::Result<(), TransportError> {
        self.transport.execute(request).await.map(|_| ())
    }
}
