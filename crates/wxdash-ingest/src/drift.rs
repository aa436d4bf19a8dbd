//! Drifting sensor that only reports temperature and pressure

use crate::{SnapshotSource, SourceError, SourceResult};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use tokio::time::{sleep, Duration};
use wxdash_core::{round1, EnvironmentReading, SnapshotUpdate};

/// Simulated latency of a drift fetch
pub const DRIFT_LATENCY: Duration = Duration::from_millis(800);

/// Largest change per fetch, in °C and hPa
pub const MAX_DRIFT: f64 = 0.5;

struct DriftState {
    temperature: f64,
    pressure: f64,
    rng: StdRng,
}

/// Source that nudges the last temperature and pressure by at most
/// [`MAX_DRIFT`] on each fetch and leaves every other field untouched.
///
/// The baseline is owned by the source and advances with every fetch.
pub struct DriftSource {
    state: Mutex<DriftState>,
    latency: Duration,
}

impl DriftSource {
    pub fn new(baseline: &EnvironmentReading) -> Self {
        Self::from_rng(baseline, StdRng::from_entropy())
    }

    pub fn seeded(baseline: &EnvironmentReading, seed: u64) -> Self {
        Self::from_rng(baseline, StdRng::seed_from_u64(seed))
    }

    fn from_rng(baseline: &EnvironmentReading, rng: StdRng) -> Self {
        Self {
            state: Mutex::new(DriftState {
                temperature: baseline.temperature,
                pressure: baseline.pressure,
                rng,
            }),
            latency: DRIFT_LATENCY,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Advance the baseline and return the new (temperature, pressure)
    pub fn step(&self) -> SourceResult<(f64, f64)> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| SourceError::Unavailable("drift state poisoned".to_string()))?;

        let dt = round1(state.rng.gen_range(-MAX_DRIFT..=MAX_DRIFT));
        let dp = round1(state.rng.gen_range(-MAX_DRIFT..=MAX_DRIFT));
        state.temperature = round1(state.temperature + dt);
        state.pressure = round1(state.pressure + dp);

        Ok((state.temperature, state.pressure))
    }
}

#[async_trait::async_trait]
impl SnapshotSource for DriftSource {
    fn name(&self) -> &str {
        "drift"
    }

    async fn fetch_snapshot(&self) -> SourceResult<SnapshotUpdate> {
        sleep(self.latency).await;

        let (temperature, pressure) = self.step()?;
        let update = SnapshotUpdate::empty(Utc::now())
            .with_temperature(temperature)
            .with_pressure(pressure);
        update.validate()?;

        tracing::debug!(temperature, pressure, "Drift source stepped");
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wxdash_core::StationSnapshot;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_step_stays_within_bound() {
        let baseline = StationSnapshot::seeded().reading;
        let source = DriftSource::seeded(&baseline, 11);

        let (mut prev_t, mut prev_p) = (baseline.temperature, baseline.pressure);
        for _ in 0..500 {
            let (t, p) = source.step().unwrap();
            assert!((t - prev_t).abs() <= MAX_DRIFT + EPS);
            assert!((p - prev_p).abs() <= MAX_DRIFT + EPS);
            prev_t = t;
            prev_p = p;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_is_partial() {
        let baseline = StationSnapshot::seeded().reading;
        let source = DriftSource::seeded(&baseline, 5);

        let update = source.fetch_snapshot().await.unwrap();

        assert!(update.reading.temperature.is_some());
        assert!(update.reading.pressure.is_some());
        assert_eq!(update.reading.humidity, None);
        assert_eq!(update.reading.wind_speed, None);
        assert!(update.forecast.is_none());
        assert!(update.last_image.is_none());
        assert!(update.devices.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_waits_for_latency() {
        let baseline = StationSnapshot::seeded().reading;
        let source = DriftSource::seeded(&baseline, 5).with_latency(Duration::from_secs(2));
        let start = tokio::time::Instant::now();

        source.fetch_snapshot().await.unwrap();

        assert!(start.elapsed() >= Duration::from_secs(2));
    }
}
