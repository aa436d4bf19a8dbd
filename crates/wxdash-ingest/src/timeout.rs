//! Bounded fetches

use crate::{SnapshotSource, SourceError, SourceResult};
use tokio::time::{timeout, Duration};
use wxdash_core::SnapshotUpdate;

/// Wraps a source so that a hanging fetch becomes [`SourceError::Timeout`]
pub struct TimeoutSource<S> {
    inner: S,
    limit: Duration,
}

impl<S: SnapshotSource> TimeoutSource<S> {
    pub fn new(inner: S, limit: Duration) -> Self {
        Self { inner, limit }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[async_trait::async_trait]
impl<S: SnapshotSource> SnapshotSource for TimeoutSource<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn fetch_snapshot(&self) -> SourceResult<SnapshotUpdate> {
        timeout(self.limit, self.inner.fetch_snapshot())
            .await
            .map_err(|_| SourceError::Timeout(self.limit))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DriftSource;
    use wxdash_core::StationSnapshot;

    #[tokio::test(start_paused = true)]
    async fn test_slow_source_times_out() {
        let baseline = StationSnapshot::seeded().reading;
        let slow = DriftSource::seeded(&baseline, 1).with_latency(Duration::from_secs(60));
        let source = TimeoutSource::new(slow, Duration::from_secs(5));

        let err = source.fetch_snapshot().await.unwrap_err();

        assert!(matches!(err, SourceError::Timeout(d) if d == Duration::from_secs(5)));
        assert_eq!(source.name(), "drift");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_source_passes_through() {
        let baseline = StationSnapshot::seeded().reading;
        let fast = DriftSource::seeded(&baseline, 1).with_latency(Duration::from_millis(10));
        let source = TimeoutSource::new(fast, Duration::from_secs(5));

        let update = source.fetch_snapshot().await.unwrap();
        assert!(update.reading.temperature.is_some());
    }
}
