//! Background sweeper for expired session tokens and stale revocations
//!
//! Expired session records are deleted in bounded batches with a pause
//! between batches, keeping lock contention and I/O burstiness on the
//! backing store bounded. Signed tokens self-expire; their revocation
//! list is pruned alongside. Partial failures are recorded in the report,
//! never raised: the sweep is best-effort and convergent over repeated
//! runs.

use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use vault_shared::config::SweeperSettings;

use crate::repositories::TokenStore;

use super::codec::ClaimsCodec;
use super::service::AuthTokenService;

/// Configuration for the expired-token sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// Whether the background sweep is enabled
    pub enabled: bool,
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Maximum number of records to delete per sweep
    pub max_delete: usize,
    /// Number of records to delete per batch
    pub batch_size: usize,
    /// Pause between batches
    pub batch_pause: Duration,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 3600, // Run every hour
            max_delete: 10_000,
            batch_size: 1_000,
            batch_pause: Duration::from_millis(100),
        }
    }
}

impl From<&SweeperSettings> for SweeperConfig {
    fn from(settings: &SweeperSettings) -> Self {
        Self {
            enabled: settings.enabled,
            interval_seconds: settings.interval_seconds,
            max_delete: settings.max_delete,
            batch_size: settings.batch_size,
            batch_pause: Duration::from_millis(settings.batch_pause_millis),
        }
    }
}

/// Result of a single sweep cycle
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Number of expired session records deleted
    pub tokens_deleted: usize,
    /// Number of stale revocation entries pruned
    pub revocations_pruned: usize,
    /// Any errors encountered during the sweep
    pub errors: Vec<String>,
}

impl SweepReport {
    /// Check if the sweep completed without errors
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of items removed
    pub fn total_removed(&self) -> usize {
        self.tokens_deleted + self.revocations_pruned
    }
}

/// Periodic sweeper over an [`AuthTokenService`]
pub struct ExpiredTokenSweeper<S: TokenStore + 'static, C: ClaimsCodec + 'static> {
    service: Arc<AuthTokenService<S, C>>,
    config: SweeperConfig,
}

impl<S: TokenStore, C: ClaimsCodec> ExpiredTokenSweeper<S, C> {
    /// Create a new sweeper over the given service
    pub fn new(service: Arc<AuthTokenService<S, C>>, config: SweeperConfig) -> Self {
        Self { service, config }
    }

    /// Run a single sweep cycle
    ///
    /// Deletes expired session records in batches, then prunes the signed
    /// revocation list. Each step's failure is recorded and the other
    /// step still runs.
    pub async fn run_sweep(&self) -> SweepReport {
        if !self.config.enabled {
            return SweepReport::default();
        }

        info!("starting expired-token sweep");

        let mut report = SweepReport::default();

        match self
            .service
            .sweep_expired(
                self.config.max_delete,
                self.config.batch_size,
                self.config.batch_pause,
            )
            .await
        {
            Ok(count) => {
                report.tokens_deleted = count;
                info!("deleted {} expired session tokens", count);
            }
            Err(e) => {
                error!("failed to delete expired tokens: {}", e);
                report.errors.push(format!("token sweep error: {}", e));
            }
        }

        match self.service.prune_revocations().await {
            Ok(count) => {
                report.revocations_pruned = count;
                info!("pruned {} stale revocation entries", count);
            }
            Err(e) => {
                error!("failed to prune revocations: {}", e);
                report.errors.push(format!("revocation prune error: {}", e));
            }
        }

        info!(
            "sweep completed - tokens: {}, revocations: {}",
            report.tokens_deleted, report.revocations_pruned
        );

        report
    }

    /// Start the sweeper as a background task
    ///
    /// Spawns a tokio task that runs a sweep at regular intervals,
    /// independent of request-handling tasks.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("expired-token sweeper is disabled");
            return;
        }

        let interval = Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "expired-token sweeper started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                let report = self.run_sweep().await;
                if !report.is_success() {
                    warn!("sweep completed with errors: {:?}", report.errors);
                }
            }
        });
    }
}
