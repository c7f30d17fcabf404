//! Soter backend access layer.
//!
//! This crate provides the client every Soter surface uses to reach the
//! aid-package backend. It focuses on:
//!
//! - Reading client configuration (`SOTER_API_URL`, `SOTER_USE_MOCKS`) into
//!   an explicit [`ClientConfig`] instance
//! - Routing each request either to an in-process [`mock::MockRegistry`] or
//!   to the real HTTP [`Transport`]
//! - Keeping mocked and real responses uniform, so callers cannot tell the
//!   origin of a response apart from timing
//!
//! The primary entry point is [`SoterClient`]. Create an instance via
//! [`SoterClient::from_env`], then issue requests with
//! [`SoterClient::request`] or the [`SoterClient::get`] shorthand.
//!
//! # Example
//!
//! ```ignore
//! use anyhow::Result;
//! use soter_api::SoterClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = SoterClient::from_env()?;
//!     let res = client.get("/health").await?;
//!     println!("status: {}", res.status);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod mock;
pub mod packages;
pub mod request;
pub mod response;
pub mod transport;

pub use client::{MOCK_LATENCY, SoterClient};
pub use config::{ClientConfig, EnvironmentInfo};
pub use error::ApiError;
pub use packages::fetch_aid_packages;
pub use request::ApiRequest;
pub use response::ApiResponse;
pub use transport::{HttpTransport, Transport};
