//! Request descriptors handed to the interception client.

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

/// A single request to the backend.
///
/// `target` is either an absolute URL or a root-relative path; the client
/// decides where it routes. A descriptor is immutable once handed to
/// [`SoterClient::request`](crate::SoterClient::request). Dropping the
/// returned future cancels the request, aborting any underlying I/O.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    /// Absolute URL or root-relative path.
    pub target: String,
    /// HTTP method.
    pub method: Method,
    /// Additional request headers.
    pub headers: HeaderMap,
    /// Optional JSON body.
    pub body: Option<Value>,
    /// Ask caches not to store or serve this response.
    pub no_store: bool,
}

impl ApiRequest {
    /// Build a request with an explicit method.
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            method,
            headers: HeaderMap::new(),
            body: None,
            no_store: false,
        }
    }

    /// Shorthand for a GET request.
    pub fn get(target: impl Into<String>) -> Self {
        Self::new(Method::GET, target)
    }

    /// Attach a header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Attach a JSON body.
    pub fn with_json_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Mark the request as uncacheable. The real transport forwards this as
    /// a `Cache-Control: no-store` header.
    pub fn with_no_store(mut self) -> Self {
        self.no_store = true;
        self
    }
}
