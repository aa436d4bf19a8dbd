//! Snapshot source adapters
//!
//! This crate provides the interface the refresh controller pulls station
//! snapshots through, plus the simulated sources used until real device
//! telemetry is wired in.

pub mod drift;
pub mod registry;
pub mod simulator;
pub mod timeout;

pub use drift::*;
pub use registry::*;
pub use simulator::*;
pub use timeout::*;

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use wxdash_core::{ModelError, SnapshotUpdate};

/// Reasons a source could not produce a snapshot
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Timeout after {0:?} waiting for snapshot")]
    Timeout(Duration),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] ModelError),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Anything that can produce station snapshots
#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Source name/identifier
    fn name(&self) -> &str;

    /// Acquire the current station state.
    ///
    /// May take a while; each call is independent of the previous one
    /// apart from state the implementation declares explicitly.
    async fn fetch_snapshot(&self) -> SourceResult<SnapshotUpdate>;
}

#[async_trait::async_trait]
impl<S: SnapshotSource + ?Sized> SnapshotSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch_snapshot(&self) -> SourceResult<SnapshotUpdate> {
        (**self).fetch_snapshot().await
    }
}

#[async_trait::async_trait]
impl<S: SnapshotSource + ?Sized> SnapshotSource for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch_snapshot(&self) -> SourceResult<SnapshotUpdate> {
        (**self).fetch_snapshot().await
    }
}
