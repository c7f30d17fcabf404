//! The background poll loop and its runtime handle.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use chrono::Utc;
use soter_api::SoterClient;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use soter_types::HealthSnapshot;

use crate::fetch::{HealthError, fetch_health};
use crate::state::HealthStatus;

/// Scheduling knobs for the poll loop.
#[derive(Clone, Copy, Debug)]
pub struct HealthMonitorConfig {
    /// Time between cycle starts. The first cycle runs immediately on
    /// spawn; a full interval always separates subsequent starts.
    pub poll_interval: Duration,
    /// Deadline for each individual attempt. Expiry cancels the in-flight
    /// request, so an attempt can never outlive its cycle's budget.
    pub request_timeout: Duration,
    /// Immediate retries after a failed attempt before the cycle accepts
    /// the failure. No backoff between attempts.
    pub retries: u32,
}

impl Default for HealthMonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            request_timeout: Duration::from_secs(8),
            retries: 1,
        }
    }
}

/// Polls the backend health endpoint and publishes [`HealthStatus`].
pub struct HealthMonitor {
    client: Arc<SoterClient>,
    config: HealthMonitorConfig,
}

impl HealthMonitor {
    pub fn new(client: Arc<SoterClient>) -> Self {
        Self::with_config(client, HealthMonitorConfig::default())
    }

    pub fn with_config(client: Arc<SoterClient>, config: HealthMonitorConfig) -> Self {
        Self { client, config }
    }

    /// Start polling and return a handle for reads and shutdown.
    ///
    /// Polling runs until [`HealthMonitorHandle::stop`] is called,
    /// regardless of whether anyone is reading the published status.
    pub fn spawn(self) -> HealthMonitorHandle {
        let (sender, receiver) = watch::channel(HealthStatus::loading());
        let cancellation_token = CancellationToken::new();
        let task = tokio::spawn(run_poll_loop(
            self.client,
            self.config,
            sender,
            cancellation_token.child_token(),
        ));
        info!(
            poll_interval_secs = self.config.poll_interval.as_secs(),
            request_timeout_secs = self.config.request_timeout.as_secs(),
            "health monitor started"
        );
        HealthMonitorHandle {
            receiver,
            cancellation_token,
            task,
        }
    }
}

/// Runtime handle for a spawned [`HealthMonitor`].
pub struct HealthMonitorHandle {
    receiver: watch::Receiver<HealthStatus>,
    cancellation_token: CancellationToken,
    task: JoinHandle<()>,
}

impl HealthMonitorHandle {
    /// The latest published status.
    pub fn status(&self) -> HealthStatus {
        self.receiver.borrow().clone()
    }

    /// Subscribe to status changes.
    pub fn subscribe(&self) -> watch::Receiver<HealthStatus> {
        self.receiver.clone()
    }

    /// Stop polling, aborting any in-flight request, and wait for the loop
    /// to finish.
    pub async fn stop(self) -> Result<()> {
        self.cancellation_token.cancel();
        self.task
            .await
            .map_err(|error| anyhow!("health monitor task failed: {error}"))?;
        info!("health monitor stopped");
        Ok(())
    }
}

async fn run_poll_loop(
    client: Arc<SoterClient>,
    config: HealthMonitorConfig,
    sender: watch::Sender<HealthStatus>,
    cancellation_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(config.poll_interval);
    // A slow cycle must not cause the next one to start early.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancellation_token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        // Cancellation while a request is outstanding drops the attempt
        // future, aborting the underlying I/O wait.
        let outcome = tokio::select! {
            _ = cancellation_token.cancelled() => break,
            outcome = poll_once(&client, &config) => outcome,
        };

        let previous = sender.borrow().clone();
        let next = match outcome {
            Ok(snapshot) => {
                debug!(state = %derive_label(&snapshot), "health poll completed");
                HealthStatus::from_snapshot(snapshot, Utc::now())
            }
            Err(error) => {
                warn!(%error, "health cycle failed");
                previous.after_failure(error)
            }
        };
        // Receivers may come and go; an unobserved update is not an error.
        let _ = sender.send(next);
    }
}

/// One poll cycle: the initial attempt plus up to `retries` immediate
/// retries, each bounded by the request timeout.
async fn poll_once(client: &SoterClient, config: &HealthMonitorConfig) -> Result<HealthSnapshot, HealthError> {
    let attempts = 1 + config.retries;
    let mut last_error = None;
    for attempt in 1..=attempts {
        match fetch_health(client, config.request_timeout).await {
            Ok(snapshot) => return Ok(snapshot),
            Err(error) => {
                warn!(attempt, attempts, %error, "health attempt failed");
                last_error = Some(error);
            }
        }
    }
    Err(last_error.unwrap_or(HealthError::Timeout))
}

fn derive_label(snapshot: &HealthSnapshot) -> &str {
    snapshot.status.as_deref().unwrap_or("absent")
}
