//! Session cleanup service for periodic removal of expired OTP sessions
//!
//! Runs independently of request handling and interacts with the manager
//! only through deletions on the shared [`SessionStore`].

use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use super::store::SessionStore;

/// Configuration for the session cleanup service
#[derive(Debug, Clone)]
pub struct SessionCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for SessionCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 300, // Run every 5 minutes
            enabled: true,
        }
    }
}

/// Service for sweeping expired sessions out of the store
pub struct SessionCleanupService {
    store: Arc<SessionStore>,
    config: SessionCleanupConfig,
    consume_window: Duration,
}

impl SessionCleanupService {
    /// Create a new session cleanup service
    pub fn new(
        store: Arc<SessionStore>,
        config: SessionCleanupConfig,
        consume_window: Duration,
    ) -> Self {
        Self {
            store,
            config,
            consume_window,
        }
    }

    /// Run a single cleanup cycle
    pub async fn run_cleanup(&self) -> CleanupResult {
        let result = self.store.sweep(Utc::now(), self.consume_window).await;

        if result.total_cleaned() > 0 {
            info!(
                event = "sessions_swept",
                expired_pending = result.expired_pending,
                expired_verified = result.expired_verified,
                "Removed expired OTP sessions"
            );
        } else {
            debug!(event = "sessions_swept", "No expired OTP sessions to remove");
        }

        result
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` when cleanup is disabled. The first sweep runs one
    /// full interval after start.
    pub fn start_background_task(self: Arc<Self>) -> Option<CleanupHandle> {
        if !self.config.enabled || self.config.interval_seconds == 0 {
            warn!("Session cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "Session cleanup service started"
            );

            let mut interval_timer = tokio::time::interval(interval);
            interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately
            interval_timer.tick().await;

            loop {
                tokio::select! {
                    _ = interval_timer.tick() => {
                        self.run_cleanup().await;
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Session cleanup service stopped");
        });

        Some(CleanupHandle { shutdown_tx, task })
    }
}

/// Handle to a running cleanup task
#[derive(Debug)]
pub struct CleanupHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl CleanupHandle {
    /// Signal the task to stop and wait for it to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            error!(error = %e, "Session cleanup task terminated abnormally");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupResult {
    /// Pending sessions removed after their verification deadline
    pub expired_pending: usize,
    /// Verified sessions removed after their consume window
    pub expired_verified: usize,
}

impl CleanupResult {
    /// Get total number of sessions cleaned up
    pub fn total_cleaned(&self) -> usize {
        self.expired_pending + self.expired_verified
    }
}
