//! wxdash daemon - refresh loop for the station dashboard
//!
//! This binary coordinates:
//! - Snapshot source construction (simulator or drift)
//! - Periodic refreshes through the refresh controller
//! - Logging every displayed-state transition

mod config;
mod display;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use wxdash_config::AppConfig;
use wxdash_core::StationSnapshot;
use wxdash_ingest::{SnapshotSource, SourceRegistry, SourceSettings};
use wxdash_refresh::{RefreshController, Scheduler};

use crate::config::DaemonConfig;

#[tokio::main]
async fn main() -> Result<()> {
    wxdash_obs::init("wxdashd");

    info!("Starting wxdash daemon");

    // Load configuration
    let app = AppConfig::load().context("Failed to load configuration")?;
    let config = DaemonConfig::resolve(&app)?;
    info!("Loaded configuration: {:?}", config);

    // Build the snapshot source
    let seeded = StationSnapshot::seeded();
    let settings = SourceSettings {
        latency: config.latency,
        seed: config.seed,
        baseline: seeded.reading,
    };
    let registry = SourceRegistry::with_builtins().await;
    let available = registry.list_sources().await;
    let source = registry
        .create(&config.source, &settings)
        .await
        .with_context(|| {
            format!(
                "Failed to create source '{}' (available: {})",
                config.source,
                available.join(", ")
            )
        })?;
    info!(station = %config.station_id, "Snapshot source ready: {}", source.name());

    let controller = Arc::new(
        RefreshController::new(source, seeded).with_fetch_timeout(config.fetch_timeout),
    );
    tokio::spawn(display::follow(controller.subscribe()));

    match config.refresh_interval {
        Some(period) => {
            let mut scheduler = Scheduler::new(Arc::clone(&controller), period);

            info!("Daemon running - press Ctrl+C to stop");

            tokio::select! {
                _ = scheduler.run() => {}
                result = shutdown_signal() => {
                    result?;
                    info!("Shutdown signal received");
                    scheduler.stop();
                }
            }
        }
        None => {
            info!("Auto refresh disabled; running a single refresh");
            controller.refresh().await;
            info!("Daemon idle - press Ctrl+C to stop");
            shutdown_signal().await?;
        }
    }

    info!("wxdash daemon stopped");
    Ok(())
}

/// Wait for Ctrl+C
async fn shutdown_signal() -> Result<()> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")
}
