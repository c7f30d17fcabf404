//! Aid package collection items returned by `GET /aid-packages`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single tracked aid package.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AidPackage {
    /// Backend-assigned identifier.
    pub id: String,
    /// Human-readable package name.
    pub name: String,
    /// Delivery status reported by the backend.
    pub status: PackageStatus,
}

/// Delivery status of an aid package.
///
/// The backend owns this vocabulary; statuses this client does not know yet
/// must not fail list decoding, so they collapse into [`PackageStatus::Unknown`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageStatus {
    Pending,
    Delivered,
    Cancelled,
    /// Any status value not recognized by this client version.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}
