//! Daemon configuration: TOML file plus environment overrides

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use wxdash_config::AppConfig;

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub station_id: String,

    /// Registered source name (default: simulator)
    pub source: String,

    /// Simulated fetch latency; source default when unset
    pub latency: Option<Duration>,

    pub seed: Option<u64>,

    /// Auto-refresh period; `None` means manual refresh only
    pub refresh_interval: Option<Duration>,

    pub fetch_timeout: Duration,
}

impl DaemonConfig {
    /// Resolve from the config file, then apply WXDASH_SOURCE and
    /// WXDASH_REFRESH_SECS from the process environment
    pub fn resolve(app: &AppConfig) -> Result<Self> {
        Self::resolve_with(app, |key| env::var(key).ok())
    }

    pub fn resolve_with(app: &AppConfig, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let source = lookup("WXDASH_SOURCE").unwrap_or_else(|| app.source_kind());

        let refresh_interval = match lookup("WXDASH_REFRESH_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().context("Invalid WXDASH_REFRESH_SECS")?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => app.refresh_interval(),
        };

        Ok(Self {
            station_id: app.station_id(),
            source,
            latency: app.source_latency(),
            seed: app.source_seed(),
            refresh_interval,
            fetch_timeout: app.fetch_timeout(),
        })
    }
}
