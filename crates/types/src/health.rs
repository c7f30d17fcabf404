//! Health endpoint payloads and the derived backend state.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw payload returned by the backend `GET /health` endpoint.
///
/// A snapshot is immutable: each successful poll produces a fresh value and
/// supersedes the previous one. Every field is optional because the client
/// never trusts the backend to send a complete body — a snapshot whose
/// `status` is absent is still a decodable snapshot (it classifies as
/// `down`, not as a decode failure).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    /// Service-defined status string; `"ok"` means healthy.
    #[serde(default)]
    pub status: Option<String>,
    /// Server-side time the snapshot was produced.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Backend build version.
    #[serde(default)]
    pub version: Option<String>,
    /// Reporting service name.
    #[serde(default)]
    pub service: Option<String>,
    /// Free-form diagnostic details (for example `{"uptime": 12345}`).
    #[serde(default)]
    pub details: Option<Value>,
}

impl HealthSnapshot {
    /// True when the backend reported the healthy `"ok"` status.
    pub fn reports_ok(&self) -> bool {
        self.status.as_deref() == Some("ok")
    }
}

/// Discrete backend health classification shown to consumers.
///
/// Always recomputed from the latest poll outcome, never stored and mutated
/// independently.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    /// First poll has not completed yet.
    Loading,
    /// Latest snapshot reported `"ok"`.
    Ok,
    /// Latest snapshot carried a status other than `"ok"`.
    Degraded,
    /// Latest poll failed, or the snapshot carried no status at all.
    Down,
}

impl HealthState {
    /// True when the backend answered its most recent poll, even if degraded.
    pub fn is_operational(self) -> bool {
        matches!(self, Self::Ok | Self::Degraded)
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Loading => "loading",
            Self::Ok => "ok",
            Self::Degraded => "degraded",
            Self::Down => "down",
        };
        f.write_str(label)
    }
}
