//! One-shot fetcher for the aid-package collection.

use soter_types::AidPackage;

use crate::client::SoterClient;
use crate::error::ApiError;

/// Fetch the full aid-package list.
///
/// A pending call is the loading state; the `Result` carries the data or
/// the error, with no derived state machine on top. Non-success statuses
/// reject with [`ApiError::Status`].
pub async fn fetch_aid_packages(client: &SoterClient) -> Result<Vec<AidPackage>, ApiError> {
    let target = format!("{}/aid-packages", client.config().api_url());
    let response = client.get(target).await?;
    if !response.is_success() {
        return Err(ApiError::Status { status: response.status });
    }
    Ok(response.json()?)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::json;
    use soter_types::PackageStatus;

    use super::*;
    use crate::config::ClientConfig;
    use crate::mock::builtin_registry;
    use crate::request::ApiRequest;
    use crate::response::ApiResponse;
    use crate::transport::Transport;

    struct FixedTransport {
        status: StatusCode,
        body: serde_json::Value,
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn execute(&self, _request: &ApiRequest) -> Result<ApiResponse, ApiError> {
            Ok(ApiResponse::json_value(self.status, &self.body))
        }
    }

    fn client(use_mocks: bool, transport: Arc<dyn Transport>) -> SoterClient {
        let config = ClientConfig::new("http://localhost:4000", use_mocks).expect("config");
        SoterClient::new(config, Arc::new(builtin_registry()), transport)
    }

    #[tokio::test(start_paused = true)]
    async fn decodes_the_mocked_package_list() {
        let transport = Arc::new(FixedTransport {
            status: StatusCode::OK,
            body: json!([]),
        });
        let packages = fetch_aid_packages(&client(true, transport)).await.expect("packages");

        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name, "Food Aid");
        assert_eq!(packages[0].status, PackageStatus::Pending);
        assert_eq!(packages[1].status, PackageStatus::Delivered);
    }

    #[tokio::test]
    async fn non_success_status_rejects() {
        let transport = Arc::new(FixedTransport {
            status: StatusCode::BAD_GATEWAY,
            body: json!({ "error": "upstream" }),
        });
        let err = fetch_aid_packages(&client(false, transport)).await.expect_err("must reject");

        assert!(matches!(err, ApiError::Status { status } if status == StatusCode::BAD_GATEWAY));
    }

    #[tokio::test]
    async fn undecodable_body_surfaces_a_decode_error() {
        let transport = Arc::new(FixedTransport {
            status: StatusCode::OK,
            body: json!({ "not": "an array" }),
        });
        let err = fetch_aid_packages(&client(false, transport)).await.expect_err("must reject");

        assert!(matches!(err, ApiError::Decode(_)));
    }
}
