//! In-process mock registry for backend endpoints.
//!
//! The registry maps query-less request paths to responder functions. It is
//! constructed once at startup and read-only thereafter; the interception
//! client shares it behind an [`Arc`](std::sync::Arc) and consults it only
//! when mocking is enabled.

use std::collections::HashMap;

use chrono::Utc;
use reqwest::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::request::ApiRequest;
use crate::response::ApiResponse;

/// Synthesizes a response for a matched request.
///
/// Responders are pure: given the same descriptor they produce an
/// equivalent response, except for embedding the current time where the
/// payload calls for "now".
pub type MockResponder = Box<dyn Fn(&ApiRequest) -> ApiResponse + Send + Sync>;

/// Registration-time defects. These indicate a startup misconfiguration,
/// not a recoverable runtime condition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MockRegistryError {
    /// A responder is already registered for this path.
    #[error("duplicate mock registration for path '{path}'")]
    DuplicatePath { path: String },

    /// The path is not a query-less, root-relative path.
    #[error("invalid mock path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
}

/// Fixed mapping from normalized request path to responder.
#[derive(Default)]
pub struct MockRegistry {
    responders: HashMap<String, MockResponder>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a responder for a path.
    ///
    /// The path must start with `/` and carry no query component. At most
    /// one responder may exist per path.
    pub fn register(
        &mut self,
        path: impl Into<String>,
        responder: impl Fn(&ApiRequest) -> ApiResponse + Send + Sync + 'static,
    ) -> Result<(), MockRegistryError> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(MockRegistryError::InvalidPath {
                path,
                reason: "must start with '/'".to_string(),
            });
        }
        if path.contains('?') {
            return Err(MockRegistryError::InvalidPath {
                path,
                reason: "must not carry a query component".to_string(),
            });
        }
        if self.responders.contains_key(&path) {
            return Err(MockRegistryError::DuplicatePath { path });
        }
        self.responders.insert(path, Box::new(responder));
        Ok(())
    }

    /// Look up the responder for an already query-stripped path.
    pub fn responder(&self, path: &str) -> Option<&MockResponder> {
        self.responders.get(path)
    }

    /// Registered paths, for diagnostics.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.responders.keys().map(String::as_str)
    }
}

/// Registry carrying the endpoints the Soter backend exposes today.
pub fn builtin_registry() -> MockRegistry {
    let mut registry = MockRegistry::new();

    registry
        .register("/health", |_request| {
            ApiResponse::json_value(
                StatusCode::OK,
                &json!({
                    "status": "ok",
                    "timestamp": Utc::now().to_rfc3339(),
                    "version": "1.0.0-mock",
                    "service": "soter-backend-mock",
                    "details": { "uptime": 12345 },
                }),
            )
        })
        .expect("builtin /health registration");

    registry
        .register("/aid-packages", |_request| {
            ApiResponse::json_value(
                StatusCode::OK,
                &json!([
                    { "id": "1", "name": "Food Aid", "status": "pending" },
                    { "id": "2", "name": "Medical Supplies", "status": "delivered" },
                ]),
            )
        })
        .expect("builtin /aid-packages registration");

    registry
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    fn respond_ok(_request: &ApiRequest) -> ApiResponse {
        ApiResponse::json_value(StatusCode::OK, &json!({}))
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = MockRegistry::new();
        registry.register("/health", respond_ok).expect("first registration");

        let err = registry.register("/health", respond_ok).expect_err("duplicate must fail");
        assert_eq!(
            err,
            MockRegistryError::DuplicatePath {
                path: "/health".to_string()
            }
        );
    }

    #[test]
    fn paths_must_be_root_relative_and_query_less() {
        let mut registry = MockRegistry::new();

        let err = registry.register("health", respond_ok).expect_err("relative path");
        assert!(matches!(err, MockRegistryError::InvalidPath { .. }));

        let err = registry
            .register("/health?verbose=1", respond_ok)
            .expect_err("query component");
        assert!(matches!(err, MockRegistryError::InvalidPath { .. }));
    }

    #[test]
    fn lookup_misses_unregistered_paths() {
        let registry = builtin_registry();
        assert!(registry.responder("/health").is_some());
        assert!(registry.responder("/missing").is_none());
    }

    #[test]
    fn builtin_health_body_matches_backend_shape() {
        let registry = builtin_registry();
        let responder = registry.responder("/health").expect("registered");
        let response = responder(&ApiRequest::get("/health"));

        assert_eq!(response.status, StatusCode::OK);
        let body: Value = response.json().expect("json body");
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], "1.0.0-mock");
        assert_eq!(body["service"], "soter-backend-mock");
        assert_eq!(body["details"]["uptime"], 12345);
    }

    #[test]
    fn builtin_packages_body_lists_two_packages() {
        let registry = builtin_registry();
        let responder = registry.responder("/aid-packages").expect("registered");
        let response = responder(&ApiRequest::get("/aid-packages"));

        let body: Value = response.json().expect("json body");
        let items = body.as_array().expect("array body");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["name"], "Food Aid");
        assert_eq!(items[1]["status"], "delivered");
    }

    #[test]
    fn responders_are_idempotent_up_to_timestamp() {
        let registry = builtin_registry();
        let responder = registry.responder("/health").expect("registered");
        let request = ApiRequest::get("/health");

        let mut first: Value = responder(&request).json().expect("first body");
        let mut second: Value = responder(&request).json().expect("second body");
        first.as_object_mut().expect("object").remove("timestamp");
        second.as_object_mut().expect("object").remove("timestamp");
        assert_eq!(first, second);
    }
}
