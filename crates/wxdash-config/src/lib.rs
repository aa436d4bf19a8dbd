use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "WXDASH_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "wxdash.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StationConfig {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SourceConfig {
    /// Registered source name ("simulator" or "drift")
    pub kind: Option<String>,
    /// Simulated fetch latency in milliseconds
    pub latency_ms: Option<u64>,
    /// Fixed RNG seed
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RefreshConfig {
    /// Auto-refresh period; 0 disables the timer
    pub interval_secs: Option<u64>,
    /// Upper bound on a single fetch
    pub fetch_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    pub station: Option<StationConfig>,
    pub source: Option<SourceConfig>,
    pub refresh: Option<RefreshConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppConfig {
    /// Load configuration from the WXDASH_CONFIG path (TOML) if present, with reasonable defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(path)
    }

    /// Load from an explicit path; a missing file yields the defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let cfg = if path.exists() {
            let s = fs::read_to_string(path)?;
            toml::from_str::<AppConfig>(&s)?
        } else {
            AppConfig::default()
        };
        Ok(cfg)
    }

    /// Station id (default "station-01")
    pub fn station_id(&self) -> String {
        self.station
            .as_ref()
            .and_then(|s| s.id.clone())
            .unwrap_or_else(|| "station-01".to_string())
    }

    /// Source kind (default "simulator")
    pub fn source_kind(&self) -> String {
        self.source
            .as_ref()
            .and_then(|s| s.kind.clone())
            .unwrap_or_else(|| "simulator".to_string())
    }

    pub fn source_latency(&self) -> Option<Duration> {
        self.source
            .as_ref()
            .and_then(|s| s.latency_ms)
            .map(Duration::from_millis)
    }

    pub fn source_seed(&self) -> Option<u64> {
        self.source.as_ref().and_then(|s| s.seed)
    }

    /// Auto-refresh period (default 60s); `None` when disabled with 0
    pub fn refresh_interval(&self) -> Option<Duration> {
        let secs = self
            .refresh
            .as_ref()
            .and_then(|r| r.interval_secs)
            .unwrap_or(60);
        (secs > 0).then(|| Duration::from_secs(secs))
    }

    /// Fetch bound (default 5000ms)
    pub fn fetch_timeout(&self) -> Duration {
        let ms = self
            .refresh
            .as_ref()
            .and_then(|r| r.fetch_timeout_ms)
            .unwrap_or(5000);
        Duration::from_millis(ms)
    }
}
