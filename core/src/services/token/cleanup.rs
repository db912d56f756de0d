//! Periodic cleanup of expired token metadata
//!
//! Expired records are dead weight: the signed token can no longer pass
//! decode validation, so once past expiry the row only slows the store
//! down. This service runs the delete sweep on a timer, outside the
//! request path.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::TokenStore;

/// Configuration for the token cleanup service
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether the background sweep is enabled
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            enabled: true,
        }
    }
}

/// Service deleting expired token metadata on a timer
pub struct TokenCleanupService<S: TokenStore + 'static> {
    store: Arc<S>,
    config: TokenCleanupConfig,
}

impl<S: TokenStore> TokenCleanupService<S> {
    /// Create a new cleanup service
    pub fn new(store: Arc<S>, config: TokenCleanupConfig) -> Self {
        Self { store, config }
    }

    /// Run a single sweep, deleting every record past its expiry
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    /// * `Err(DomainError)` - If the sweep fails
    pub async fn run_sweep(&self) -> Result<usize, DomainError> {
        if !self.config.enabled {
            return Ok(0);
        }

        let deleted = self.store.delete_expired(Utc::now()).await?;
        info!(tokens_deleted = deleted, "Token cleanup sweep completed");
        Ok(deleted)
    }

    /// Start the cleanup service as a background task
    ///
    /// Spawns a tokio task that runs the sweep at the configured interval.
    /// Sweep errors are logged and the loop continues.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Token cleanup service is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "Token cleanup service started"
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_sweep().await {
                    error!(error = %e, "Token cleanup sweep failed");
                }
            }
        });
    }
}
