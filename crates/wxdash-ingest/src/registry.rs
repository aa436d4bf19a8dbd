//! Source registry and construction

use crate::{DriftSource, SimulatorSource, SnapshotSource, SourceError, SourceResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::Duration;
use wxdash_core::{EnvironmentReading, StationSnapshot};

/// Parameters handed to a factory when building a source
#[derive(Debug, Clone)]
pub struct SourceSettings {
    /// Simulated latency; `None` keeps the source's own default
    pub latency: Option<Duration>,

    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,

    /// Reading a drifting source starts from
    pub baseline: EnvironmentReading,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            latency: None,
            seed: None,
            baseline: StationSnapshot::seeded().reading,
        }
    }
}

/// Factory trait for creating source instances
pub trait SourceFactory: Send + Sync {
    fn create(&self, settings: &SourceSettings) -> SourceResult<Box<dyn SnapshotSource>>;
}

impl<F> SourceFactory for F
where
    F: Fn(&SourceSettings) -> SourceResult<Box<dyn SnapshotSource>> + Send + Sync,
{
    fn create(&self, settings: &SourceSettings) -> SourceResult<Box<dyn SnapshotSource>> {
        self(settings)
    }
}

/// Builds [`SimulatorSource`]s
pub struct SimulatorFactory;

impl SourceFactory for SimulatorFactory {
    fn create(&self, settings: &SourceSettings) -> SourceResult<Box<dyn SnapshotSource>> {
        let mut source = match settings.seed {
            Some(seed) => SimulatorSource::seeded(seed),
            None => SimulatorSource::new(),
        };
        if let Some(latency) = settings.latency {
            source = source.with_latency(latency);
        }
        Ok(Box::new(source))
    }
}

/// Builds [`DriftSource`]s
pub struct DriftFactory;

impl SourceFactory for DriftFactory {
    fn create(&self, settings: &SourceSettings) -> SourceResult<Box<dyn SnapshotSource>> {
        settings.baseline.validate()?;
        let mut source = match settings.seed {
            Some(seed) => DriftSource::seeded(&settings.baseline, seed),
            None => DriftSource::new(&settings.baseline),
        };
        if let Some(latency) = settings.latency {
            source = source.with_latency(latency);
        }
        Ok(Box::new(source))
    }
}

/// Registry for available snapshot sources
pub struct SourceRegistry {
    factories: Arc<RwLock<HashMap<String, Box<dyn SourceFactory>>>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self {
            factories: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registry pre-populated with `simulator` and `drift`
    pub async fn with_builtins() -> Self {
        let registry = Self::new();
        registry
            .register("simulator".to_string(), SimulatorFactory)
            .await;
        registry.register("drift".to_string(), DriftFactory).await;
        registry
    }

    /// Register a new source factory
    pub async fn register<F>(&self, name: String, factory: F)
    where
        F: SourceFactory + 'static,
    {
        let mut factories = self.factories.write().await;
        factories.insert(name, Box::new(factory));
    }

    /// Create a source instance by name
    pub async fn create(
        &self,
        name: &str,
        settings: &SourceSettings,
    ) -> SourceResult<Box<dyn SnapshotSource>> {
        let factories = self.factories.read().await;
        let factory = factories
            .get(name)
            .ok_or_else(|| SourceError::Unavailable(format!("Unknown source: {}", name)))?;
        factory.create(settings)
    }

    /// List all registered source names, sorted
    pub async fn list_sources(&self) -> Vec<String> {
        let factories = self.factories.read().await;
        let mut names: Vec<String> = factories.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builtins_registered() {
        let registry = SourceRegistry::with_builtins().await;

        let names = registry.list_sources().await;
        assert_eq!(names, vec!["drift".to_string(), "simulator".to_string()]);

        let source = registry
            .create("simulator", &SourceSettings::default())
            .await
            .unwrap();
        assert_eq!(source.name(), "simulator");

        let source = registry
            .create("drift", &SourceSettings::default())
            .await
            .unwrap();
        assert_eq!(source.name(), "drift");
    }

    #[tokio::test]
    async fn test_unknown_source() {
        let registry = SourceRegistry::with_builtins().await;

        let err = registry
            .create("esp32-serial", &SourceSettings::default())
            .await
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Source unavailable: Unknown source: esp32-serial");
    }

    #[tokio::test]
    async fn test_closure_factory() {
        let registry = SourceRegistry::new();
        registry
            .register(
                "fast-sim".to_string(),
                |settings: &SourceSettings| -> SourceResult<Box<dyn SnapshotSource>> {
                    let source = SimulatorSource::seeded(settings.seed.unwrap_or(0))
                        .with_latency(Duration::ZERO);
                    Ok(Box::new(source))
                },
            )
            .await;

        let source = registry
            .create("fast-sim", &SourceSettings::default())
            .await
            .unwrap();
        let update = source.fetch_snapshot().await.unwrap();
        assert!(update.forecast.is_some());
    }

    #[tokio::test]
    async fn test_drift_rejects_invalid_baseline() {
        let registry = SourceRegistry::with_builtins().await;
        let mut settings = SourceSettings::default();
        settings.baseline.temperature = f64::NAN;

        let result = registry.create("drift", &settings).await;
        assert!(matches!(result, Err(SourceError::InvalidSnapshot(_))));
    }
}
