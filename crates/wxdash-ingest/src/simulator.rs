//! Simulated weather station producing full random snapshots

use crate::{SnapshotSource, SourceError, SourceResult};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use tokio::time::{sleep, Duration};
use wxdash_core::{
    default_devices, round1, CaptureTime, EnvironmentReading, ForecastEstimate, ForecastStatus,
    ImageCapture, SnapshotUpdate, StationSnapshot, DEFAULT_IMAGE_URL,
};

/// Simulated network latency of a fetch
pub const SIMULATOR_LATENCY: Duration = Duration::from_millis(1000);

const SUMMARY: &str = "Model analysis suggests current conditions will persist.";

/// Source that generates a complete synthetic snapshot on every fetch
pub struct SimulatorSource {
    rng: Mutex<StdRng>,
    latency: Duration,
    image_url: String,
}

impl SimulatorSource {
    /// Simulator seeded from OS entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic simulator for tests and reproducible demos
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            latency: SIMULATOR_LATENCY,
            image_url: DEFAULT_IMAGE_URL.to_string(),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// Generate one snapshot without the simulated delay
    pub fn generate(&self) -> SourceResult<StationSnapshot> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| SourceError::Unavailable("simulator RNG poisoned".to_string()))?;

        let now = Utc::now();
        let reading = EnvironmentReading {
            temperature: round1(rng.gen_range(20.0..30.0)),
            humidity: rng.gen_range(40..60),
            pressure: f64::from(rng.gen_range(1005u32..1020)),
            wind_speed: round1(rng.gen_range(5.0..20.0)),
        };

        let status = if rng.gen_bool(0.5) {
            ForecastStatus::Clear
        } else {
            ForecastStatus::PartlyCloudy
        };

        let snapshot = StationSnapshot {
            reading,
            last_image: Some(ImageCapture {
                url: self.image_url.clone(),
                captured_at: CaptureTime::At(now),
            }),
            forecast: ForecastEstimate {
                status,
                confidence: rng.gen_range(85..95),
                summary: SUMMARY.to_string(),
            },
            devices: default_devices(),
            observed_at: now,
        };

        snapshot.validate()?;
        Ok(snapshot)
    }
}

impl Default for SimulatorSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SnapshotSource for SimulatorSource {
    fn name(&self) -> &str {
        "simulator"
    }

    async fn fetch_snapshot(&self) -> SourceResult<SnapshotUpdate> {
        sleep(self.latency).await;

        let snapshot = self.generate()?;
        tracing::debug!(
            temperature = snapshot.reading.temperature,
            humidity = snapshot.reading.humidity,
            status = %snapshot.forecast.status,
            "Simulator generated snapshot"
        );
        Ok(snapshot.into())
    }
}
