//! The interception client: routes requests to the mock registry or the
//! real transport.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::mock::{MockRegistry, builtin_registry};
use crate::request::ApiRequest;
use crate::response::ApiResponse;
use crate::transport::{HttpTransport, Transport};

/// Artificial latency applied before a mocked response is returned, so
/// mocked flows exercise the same loading states real traffic does.
pub const MOCK_LATENCY: Duration = Duration::from_millis(500);

/// Client every Soter surface uses to reach the backend.
///
/// Routing per request, in order:
///
/// 1. mocking disabled → delegate to the transport, descriptor untouched
/// 2. mocking enabled → normalize the target to a path (strip the
///    configured base URL prefix; keep root-relative targets as-is; leave
///    foreign absolute URLs unnormalized so they fall through)
/// 3. cut the path at the first `?` and look it up in the registry
/// 4. hit → wait [`MOCK_LATENCY`], return the synthesized response; the
///    transport is never invoked on this path
/// 5. miss → delegate to the transport with the original descriptor
pub struct SoterClient {
    config: ClientConfig,
    registry: Arc<MockRegistry>,
    transport: Arc<dyn Transport>,
}

impl SoterClient {
    /// Build a client with explicit configuration, registry, and transport.
    pub fn new(config: ClientConfig, registry: Arc<MockRegistry>, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            registry,
            transport,
        }
    }

    /// Build a client from the process environment, wired to the builtin
    /// registry and the real HTTP transport.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = ClientConfig::from_env()?;
        let transport = HttpTransport::new(config.api_url())?;
        Ok(Self::new(config, Arc::new(builtin_registry()), Arc::new(transport)))
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issue a request, serving it from the mock registry when one matches.
    ///
    /// Transport-level failures propagate unchanged; the client interprets
    /// no status codes.
    pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        if !self.config.use_mocks() {
            return self.transport.execute(&request).await;
        }

        let path = self.normalize_path(&request.target);
        let key = match path.split_once('?') {
            Some((before, _)) => before,
            None => path.as_str(),
        };

        match self.registry.responder(key) {
            Some(responder) => {
                debug!(target = %request.target, path = %key, "serving mocked response");
                tokio::time::sleep(MOCK_LATENCY).await;
                Ok(responder(&request))
            }
            None => self.transport.execute(&request).await,
        }
    }

    /// Shorthand for a GET request.
    pub async fn get(&self, target: impl Into<String>) -> Result<ApiResponse, ApiError> {
        self.request(ApiRequest::get(target)).await
    }

    /// Target → candidate registry path. Foreign absolute URLs come back
    /// unchanged, so they cannot match any registered path and fall through
    /// to the transport.
    fn normalize_path(&self, target: &str) -> String {
        if let Some(stripped) = target.strip_prefix(self.config.api_url()) {
            stripped.to_string()
        } else {
            target.to_string()
        }
    }
}
