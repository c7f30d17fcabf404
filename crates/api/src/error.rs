//! Request-layer error taxonomy.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the backend access layer.
///
/// The interception client itself raises none of these. Transport failures
/// propagate unchanged from the real transport, and a non-2xx response is an
/// ordinary [`ApiResponse`](crate::ApiResponse) until a fetcher that
/// requires success rejects it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection-level failure from the real transport.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response arrived, but a fetcher required success and got `status`.
    #[error("server responded with {status}")]
    Status { status: StatusCode },

    /// A response body could not be decoded into the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL is unusable.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
