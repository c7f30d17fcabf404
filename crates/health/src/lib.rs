//! Backend health polling for Soter surfaces.
//!
//! The crate turns the backend `GET /health` endpoint into a continuously
//! updated [`HealthStatus`]: a [`HealthMonitor`] polls on a fixed interval,
//! bounds each request with a timeout, retries a failed attempt once, and
//! publishes the derived state over a watch channel. Consumers read the
//! latest value or subscribe to changes; polling continues whether or not
//! anyone is watching.

pub mod fetch;
pub mod monitor;
pub mod state;

pub use fetch::{HealthError, fetch_health};
pub use monitor::{HealthMonitor, HealthMonitorConfig, HealthMonitorHandle};
pub use state::{HealthStatus, derive_state};
