//! Timer-driven refresh loop

use crate::{RefreshController, RefreshOutcome};
use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Scheduler triggers a refresh every `period`
pub struct Scheduler {
    controller: Arc<RefreshController>,
    period: Duration,
    running: bool,
}

impl Scheduler {
    pub fn new(controller: Arc<RefreshController>, period: Duration) -> Self {
        Self {
            controller,
            period,
            running: false,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run the refresh loop. The first refresh fires immediately.
    pub async fn run(&mut self) {
        self.running = true;

        info!(
            "Scheduler started: refreshing from '{}' every {:?}",
            self.controller.source_name(),
            self.period
        );

        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while self.running {
            ticker.tick().await;
            self.trigger().await;
        }

        info!("Scheduler stopped");
    }

    /// Run a single refresh cycle and log its outcome
    pub async fn trigger(&self) -> RefreshOutcome {
        let outcome = self.controller.refresh().await;
        match &outcome {
            RefreshOutcome::Updated { at } => debug!(%at, "Scheduled refresh completed"),
            RefreshOutcome::AlreadyRefreshing => {
                debug!("Scheduled refresh skipped: manual refresh in flight")
            }
            // Keep ticking; the controller already recorded the error
            RefreshOutcome::Failed(e) => warn!("Scheduled refresh failed: {}", e),
        }
        outcome
    }

    /// Stop the scheduler
    pub fn stop(&mut self) {
        info!("Stopping scheduler...");
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
