//! Shared type definitions for the Soter backend client.
//!
//! These are the wire shapes exchanged with (or synthesized for) the Soter
//! aid-package backend, plus the small derived enums consumers render. The
//! crate is a dependency leaf: serde models only, no I/O.

pub mod health;
pub mod package;

pub use health::{HealthSnapshot, HealthState};
pub use package::{AidPackage, PackageStatus};
