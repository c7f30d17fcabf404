//! A single, bounded health request.

use std::time::Duration;

use reqwest::StatusCode;
use soter_api::{ApiError, ApiRequest, SoterClient};
use soter_types::HealthSnapshot;
use thiserror::Error;

/// Why one health attempt failed.
#[derive(Debug, Error)]
pub enum HealthError {
    /// No response within the attempt's deadline. The in-flight request is
    /// cancelled, not left to resolve in the background.
    #[error("health request timed out")]
    Timeout,

    /// The request itself failed (transport error, bad configuration).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A response arrived, but with a non-success status.
    #[error("health endpoint responded with {status}")]
    Status { status: StatusCode },

    /// A response arrived, but its body was not a health payload.
    #[error("failed to decode health payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Fetch one health snapshot, bounded by `timeout`.
///
/// The request is marked no-store so intermediaries never serve a stale
/// health body. On expiry the request future is dropped, which aborts the
/// underlying I/O wait.
pub async fn fetch_health(client: &SoterClient, timeout: Duration) -> Result<HealthSnapshot, HealthError> {
    let target = format!("{}/health", client.config().api_url());
    let request = ApiRequest::get(target).with_no_store();

    let response = tokio::time::timeout(timeout, client.request(request))
        .await
        .map_err(|_| HealthError::Timeout)??;

    if !response.is_success() {
        return Err(HealthError::Status { status: response.status });
    }
    Ok(response.json()?)
}
