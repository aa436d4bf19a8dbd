//! Refresh controller: owns the displayed snapshot and the busy flag

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::Duration;
use tracing::{debug, info, warn};
use wxdash_core::{SnapshotUpdate, StationSnapshot};
use wxdash_ingest::{SnapshotSource, SourceError, TimeoutSource};

/// Everything a presentation layer needs to draw the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub snapshot: Arc<StationSnapshot>,
    pub is_refreshing: bool,
    pub last_updated_at: DateTime<Utc>,
    pub last_error: Option<String>,
}

/// Result of a single `refresh()` call
#[derive(Debug)]
pub enum RefreshOutcome {
    /// New data merged at the given wall-clock time
    Updated { at: DateTime<Utc> },

    /// Another refresh was in flight; nothing was fetched
    AlreadyRefreshing,

    /// Fetch failed; the previous snapshot is still displayed
    Failed(SourceError),
}

impl RefreshOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, RefreshOutcome::Updated { .. })
    }
}

/// Mediates between a [`SnapshotSource`] and whatever displays its data.
///
/// States: idle (holding the current snapshot) and refreshing (one fetch in
/// flight). At most one fetch runs at a time no matter how often
/// [`refresh`](Self::refresh) is called. The controller is the only writer of
/// the displayed state; readers get cheap clones or a `watch` subscription.
pub struct RefreshController {
    source: Box<dyn SnapshotSource>,
    in_flight: AtomicBool,
    state: watch::Sender<DisplayState>,
}

impl RefreshController {
    pub fn new(source: Box<dyn SnapshotSource>, initial: StationSnapshot) -> Self {
        let (state, _) = watch::channel(DisplayState {
            snapshot: Arc::new(initial),
            is_refreshing: false,
            last_updated_at: Utc::now(),
            last_error: None,
        });

        Self {
            source,
            in_flight: AtomicBool::new(false),
            state,
        }
    }

    /// Bound every fetch; a fetch running past `limit` fails with
    /// [`SourceError::Timeout`]
    pub fn with_fetch_timeout(self, limit: Duration) -> Self {
        Self {
            source: Box::new(TimeoutSource::new(self.source, limit)),
            ..self
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch a new snapshot and merge it into the displayed state.
    ///
    /// Never returns an error: failures are recorded in `last_error` and the
    /// previous snapshot stays in place.
    pub async fn refresh(&self) -> RefreshOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Refresh already in flight, ignoring trigger");
            return RefreshOutcome::AlreadyRefreshing;
        }
        let _guard = InFlightGuard { controller: self };

        self.state.send_modify(|s| s.is_refreshing = true);
        debug!(source = %self.source.name(), "Refresh started");

        let result = match self.source.fetch_snapshot().await {
            Ok(update) => self.commit(update),
            Err(e) => Err(e),
        };

        match result {
            Ok(at) => RefreshOutcome::Updated { at },
            Err(e) => {
                warn!(source = %self.source.name(), error = %e, "Refresh failed, keeping previous snapshot");
                let message = e.to_string();
                self.state.send_modify(|s| s.last_error = Some(message));
                RefreshOutcome::Failed(e)
            }
        }
    }

    /// Merge field-wise and publish; the merged snapshot must satisfy every
    /// invariant before it replaces the current one
    fn commit(&self, update: SnapshotUpdate) -> Result<DateTime<Utc>, SourceError> {
        update.validate()?;

        let merged = self.current_snapshot().merge(update);
        merged.validate()?;

        let at = Utc::now();
        info!(
            source = %self.source.name(),
            temperature = merged.reading.temperature,
            humidity = merged.reading.humidity,
            pressure = merged.reading.pressure,
            wind_speed = merged.reading.wind_speed,
            forecast = %merged.forecast.status,
            "Snapshot refreshed"
        );

        let merged = Arc::new(merged);
        self.state.send_modify(|s| {
            s.snapshot = merged;
            s.last_updated_at = at;
            s.last_error = None;
        });
        Ok(at)
    }

    pub fn current_snapshot(&self) -> Arc<StationSnapshot> {
        Arc::clone(&self.state.borrow().snapshot)
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn last_updated_at(&self) -> DateTime<Utc> {
        self.state.borrow().last_updated_at
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    /// Copy of the whole displayed state
    pub fn view(&self) -> DisplayState {
        self.state.borrow().clone()
    }

    /// Receive every state transition
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state.subscribe()
    }
}

/// Returns the controller to idle when a refresh finishes or is dropped
struct InFlightGuard<'a> {
    controller: &'a RefreshController,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.controller.in_flight.store(false, Ordering::Release);
        self.controller.state.send_if_modified(|s| {
            let was_refreshing = s.is_refreshing;
            s.is_refreshing = false;
            was_refreshing
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wxdash_ingest::{DriftSource, SourceResult, MAX_DRIFT};

    struct FailingSource;

    #[async_trait::async_trait]
    impl SnapshotSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_snapshot(&self) -> SourceResult<SnapshotUpdate> {
            Err(SourceError::Unavailable("sensor bus offline".to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_drift_refresh_scenario() {
        let seed = StationSnapshot::seeded();
        let source = DriftSource::seeded(&seed.reading, 9);
        let controller = RefreshController::new(Box::new(source), seed.clone());

        let called_at = Utc::now();
        let outcome = controller.refresh().await;

        assert!(outcome.is_updated());
        let snap = controller.current_snapshot();
        assert_eq!(snap.reading.humidity, 45);
        assert_eq!(snap.reading.wind_speed, 12.4);
        assert!((snap.reading.temperature - 24.5).abs() <= MAX_DRIFT + 1e-9);
        assert!((snap.reading.pressure - 1012.0).abs() <= MAX_DRIFT + 1e-9);
        assert_eq!(snap.forecast, seed.forecast);
        assert!(!controller.is_refreshing());
        assert!(controller.last_updated_at() >= called_at);
        assert_eq!(controller.last_error(), None);
    }

    #[tokio::test]
    async fn test_failure_keeps_snapshot() {
        let controller =
            RefreshController::new(Box::new(FailingSource), StationSnapshot::seeded());
        let before = controller.current_snapshot();
        let updated_before = controller.last_updated_at();

        let outcome = controller.refresh().await;

        assert!(matches!(
            outcome,
            RefreshOutcome::Failed(SourceError::Unavailable(_))
        ));
        assert_eq!(*controller.current_snapshot(), *before);
        assert_eq!(controller.last_updated_at(), updated_before);
        assert_eq!(
            controller.last_error().as_deref(),
            Some("Source unavailable: sensor bus offline")
        );
        assert!(!controller.is_refreshing());
        assert!(!controller.view().is_refreshing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_timeout() {
        let seed = StationSnapshot::seeded();
        let slow = DriftSource::seeded(&seed.reading, 2).with_latency(Duration::from_secs(30));
        let controller = RefreshController::new(Box::new(slow), seed)
            .with_fetch_timeout(Duration::from_secs(3));

        let outcome = controller.refresh().await;

        assert!(matches!(outcome, RefreshOutcome::Failed(SourceError::Timeout(_))));
        assert_eq!(controller.current_snapshot().reading.temperature, 24.5);
        assert!(controller.last_error().is_some());
        assert_eq!(controller.source_name(), "drift");
    }
}
