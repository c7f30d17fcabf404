//! Derived health state and the continuously-updated status value.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use soter_types::{HealthSnapshot, HealthState};

use crate::fetch::HealthError;

/// The latest known backend health, as published by the monitor.
#[derive(Clone, Debug)]
pub struct HealthStatus {
    /// Derived classification of the latest poll outcome.
    pub state: HealthState,
    /// Most recent successful snapshot; kept across failed cycles until a
    /// new success supersedes it.
    pub data: Option<HealthSnapshot>,
    /// Error from the latest cycle, if it failed.
    pub error: Option<Arc<HealthError>>,
    /// When a poll last succeeded. Failed cycles never move this.
    pub last_checked: Option<DateTime<Utc>>,
}

impl HealthStatus {
    /// Status before the first poll completes.
    pub fn loading() -> Self {
        Self {
            state: HealthState::Loading,
            data: None,
            error: None,
            last_checked: None,
        }
    }

    /// Status after a successful poll.
    pub fn from_snapshot(snapshot: HealthSnapshot, checked_at: DateTime<Utc>) -> Self {
        Self {
            state: derive_state(false, false, snapshot.status.as_deref()),
            data: Some(snapshot),
            error: None,
            last_checked: Some(checked_at),
        }
    }

    /// Status after a failed cycle. The previous snapshot and timestamp
    /// survive; only the state and error change.
    pub fn after_failure(&self, error: HealthError) -> Self {
        Self {
            state: derive_state(false, true, None),
            data: self.data.clone(),
            error: Some(Arc::new(error)),
            last_checked: self.last_checked,
        }
    }
}

/// Map a poll outcome to the state consumers render.
///
/// Pure function of its inputs; the monitor recomputes it on every cycle
/// rather than mutating a stored state.
pub fn derive_state(in_flight: bool, failed: bool, status: Option<&str>) -> HealthState {
    if in_flight {
        return HealthState::Loading;
    }
    if failed {
        return HealthState::Down;
    }
    match status {
        Some("ok") => HealthState::Ok,
        Some(_) => HealthState::Degraded,
        None => HealthState::Down,
    }
}
