//! Client configuration read from the process environment.
//!
//! Configuration is an explicit instance, never ambient state: every
//! [`SoterClient`](crate::SoterClient) owns the [`ClientConfig`] it was
//! built with, so production code and tests can hold distinct instances
//! without interfering with one another.

use std::env;

use url::Url;

use crate::error::ApiError;

/// Environment variable enabling the in-process mock registry.
///
/// Only the literal string `"true"` enables mocking; any other value, or an
/// unset variable, disables it.
pub const ENV_USE_MOCKS: &str = "SOTER_USE_MOCKS";

/// Environment variable overriding the backend base URL.
pub const ENV_API_URL: &str = "SOTER_API_URL";

/// Base URL used when [`ENV_API_URL`] is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:4000";

/// Environment variable naming the Stellar network a deployment targets.
pub const ENV_STELLAR_NETWORK: &str = "SOTER_STELLAR_NETWORK";

/// Fallback for [`ENV_STELLAR_NETWORK`].
pub const ENV_NETWORK: &str = "SOTER_NETWORK";

/// Optional deployment label (dev, staging, prod).
pub const ENV_ENV_NAME: &str = "SOTER_ENV_NAME";

/// Routing configuration for a [`SoterClient`](crate::SoterClient).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientConfig {
    api_url: String,
    use_mocks: bool,
}

impl ClientConfig {
    /// Build a configuration with an explicit base URL and mock flag.
    ///
    /// The base URL must parse, carry a host, and use http or https. Any
    /// trailing `/` is trimmed so prefix matching against request targets
    /// stays exact.
    pub fn new(api_url: impl Into<String>, use_mocks: bool) -> Result<Self, ApiError> {
        let api_url = normalize_base_url(&api_url.into())?;
        Ok(Self { api_url, use_mocks })
    }

    /// Build a configuration from [`ENV_API_URL`] and [`ENV_USE_MOCKS`].
    pub fn from_env() -> Result<Self, ApiError> {
        let api_url = env::var(ENV_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let use_mocks = env::var(ENV_USE_MOCKS).is_ok_and(|value| value == "true");
        Self::new(api_url, use_mocks)
    }

    /// The normalized backend base URL, without a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Whether requests may be served from the mock registry.
    pub fn use_mocks(&self) -> bool {
        self.use_mocks
    }
}

/// Validate a base URL and trim trailing slashes.
///
/// Rules:
/// - must parse as an absolute URL with a host
/// - scheme must be http or https
fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let parsed = Url::parse(raw).map_err(|err| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;

    if parsed.host_str().is_none() {
        return Err(ApiError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "base URL must include a host".to_string(),
        });
    }

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ApiError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{scheme}' (expected http or https)"),
        });
    }

    Ok(raw.trim_end_matches('/').to_string())
}

/// Deployment details rendered by the environment indicator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnvironmentInfo {
    /// Stellar network the deployment targets (testnet, futurenet, mainnet).
    pub network: String,
    /// Deployment label; `None` when unset or blank.
    pub env_name: Option<String>,
}

impl EnvironmentInfo {
    /// Read the indicator values from the process environment.
    pub fn from_env() -> Self {
        let network = env::var(ENV_STELLAR_NETWORK)
            .or_else(|_| env::var(ENV_NETWORK))
            .unwrap_or_else(|_| "unknown".to_string());
        let env_name = env::var(ENV_ENV_NAME)
            .ok()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        Self { network, env_name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_falls_back_to_defaults() {
        temp_env::with_vars(
            [(ENV_API_URL, None::<&str>), (ENV_USE_MOCKS, None)],
            || {
                let config = ClientConfig::from_env().expect("default config");
                assert_eq!(config.api_url(), DEFAULT_API_URL);
                assert!(!config.use_mocks());
            },
        );
    }

    #[test]
    fn mocks_enabled_only_by_literal_true() {
        for (value, expected) in [("true", true), ("TRUE", false), ("1", false), ("yes", false)] {
            temp_env::with_vars(
                [(ENV_API_URL, None::<&str>), (ENV_USE_MOCKS, Some(value))],
                || {
                    let config = ClientConfig::from_env().expect("config");
                    assert_eq!(config.use_mocks(), expected, "value {value:?}");
                },
            );
        }
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ClientConfig::new("https://api.example.com/", false).expect("config");
        assert_eq!(config.api_url(), "https://api.example.com");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = ClientConfig::new("not a url", false).expect_err("should reject");
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = ClientConfig::new("ftp://example.com", false).expect_err("should reject");
        assert!(matches!(err, ApiError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn network_falls_back_through_chain() {
        temp_env::with_vars(
            [
                (ENV_STELLAR_NETWORK, None::<&str>),
                (ENV_NETWORK, Some("testnet")),
                (ENV_ENV_NAME, None),
            ],
            || {
                let info = EnvironmentInfo::from_env();
                assert_eq!(info.network, "testnet");
                assert_eq!(info.env_name, None);
            },
        );

        temp_env::with_vars(
            [(ENV_STELLAR_NETWORK, None::<&str>), (ENV_NETWORK, None)],
            || {
                assert_eq!(EnvironmentInfo::from_env().network, "unknown");
            },
        );
    }

    #[test]
    fn blank_env_name_reads_as_absent() {
        temp_env::with_var(ENV_ENV_NAME, Some("  staging  "), || {
            assert_eq!(EnvironmentInfo::from_env().env_name.as_deref(), Some("staging"));
        });

        temp_env::with_var(ENV_ENV_NAME, Some("   "), || {
            assert_eq!(EnvironmentInfo::from_env().env_name, None);
        });
    }
}
