//! Uniform response shape, whether synthesized or fetched.

use reqwest::StatusCode;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A backend response.
///
/// The shape is identical whether the response came from the mock registry
/// or from the real transport, so callers cannot tell the origin apart
/// except by timing. Non-2xx statuses are carried as ordinary values, never
/// as errors; rejecting them is a fetcher decision.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: String,
}

impl ApiResponse {
    /// Synthesize a JSON response. This is the constructor mock responders
    /// use; it sets `Content-Type: application/json`.
    pub fn json_value(status: StatusCode, body: &Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            status,
            headers,
            body: body.to_string(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
