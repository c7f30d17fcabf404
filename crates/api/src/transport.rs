//! The real-transport boundary behind the interception client.
//!
//! [`Transport`] is the seam tests observe: the interception client never
//! talks HTTP directly, it hands unmatched requests to whatever transport it
//! was built with. Production wires in [`HttpTransport`]; tests substitute
//! recording fakes.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{self, HeaderValue};
use tracing::debug;

use crate::error::ApiError;
use crate::request::ApiRequest;
use crate::response::ApiResponse;

/// Executes a request against the real backend.
///
/// Implementations must not interpret status codes: a non-2xx response is
/// returned as an ordinary [`ApiResponse`]. Only connection-level failures
/// surface as errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// reqwest-backed [`Transport`].
#[derive(Clone, Debug)]
pub struct HttpTransport {
    base_url: String,
    http: Client,
}

impl HttpTransport {
    /// Overall per-request deadline enforced by the underlying client.
    const CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Construct a transport resolving root-relative targets against
    /// `base_url` (already validated and trimmed by
    /// [`ClientConfig`](crate::ClientConfig)).
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(Self::CLIENT_TIMEOUT)
            .user_agent(format!("soter-client/0.1; {}", std::env::consts::OS))
            .build()
            .context("build http client")?;

        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    /// Absolute URL for a target: root-relative paths are resolved against
    /// the base URL, absolute targets go out verbatim.
    fn resolve(&self, target: &str) -> String {
        if target.starts_with('/') {
            format!("{}{}", self.base_url, target)
        } else {
            target.to_string()
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.resolve(&request.target);
        debug!(%url, method = %request.method, "dispatching request");

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .headers(request.headers.clone());
        if request.no_store {
            builder = builder.header(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(ApiResponse { status, headers, body })
    }
}
