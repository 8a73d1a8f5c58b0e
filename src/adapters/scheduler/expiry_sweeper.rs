//! ExpirySweeper - Background service closing sessions whose timer was missed.
//!
//! Closure timers live in memory and die with the process. The sweeper runs
//! [`CloseExpiredSessionsHandler`] on a fixed interval, the first run right
//! at startup, so every expired session is eventually closed.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 60s | Time between sweeps |
//!
//! ## Graceful Shutdown
//!
//! The service listens for a shutdown signal and stops between sweeps.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::application::{CloseExpiredSessionsHandler, SweepResult};
use crate::domain::agenda::AgendaError;

/// Configuration for the ExpirySweeper service.
#[derive(Debug, Clone)]
pub struct ExpirySweeperConfig {
    /// Time between sweeps.
    pub interval: Duration,
}

impl Default for ExpirySweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
        }
    }
}

impl ExpirySweeperConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Background service running the expiry sweep.
pub struct ExpirySweeper {
    handler: Arc<CloseExpiredSessionsHandler>,
    config: ExpirySweeperConfig,
}

impl ExpirySweeper {
    pub fn new(handler: Arc<CloseExpiredSessionsHandler>) -> Self {
        Self::with_config(handler, ExpirySweeperConfig::default())
    }

    pub fn with_config(
        handler: Arc<CloseExpiredSessionsHandler>,
        config: ExpirySweeperConfig,
    ) -> Self {
        Self { handler, config }
    }

    /// Run the sweep loop until the shutdown signal is received.
    ///
    /// A failed sweep is logged and retried on the next tick.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        tracing::info!(interval_secs = self.config.interval.as_secs(), "Expiry sweeper started");

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::info!("Expiry sweeper stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    // Failures are already logged by the handler.
                    let _ = self.sweep_once().await;
                }
            }
        }
    }

    /// Run exactly one sweep.
    pub async fn sweep_once(&self) -> Result<SweepResult, AgendaError> {
        let result = self.handler.handle().await?;
        if !result.closed.is_empty() || !result.failed.is_empty() {
            tracing::info!(
                closed = result.closed.len(),
                failed = result.failed.len(),
                "Expiry sweep finished"
            );
        }
        Ok(result)
    }
}
