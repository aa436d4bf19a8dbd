//! Shared test doubles for refresh pipeline tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use wxdash_core::SnapshotUpdate;
use wxdash_ingest::{SnapshotSource, SourceError, SourceResult};

/// Source that replays a fixed list of responses, optionally waiting on a
/// gate before each one
pub struct ScriptedSource {
    calls: AtomicUsize,
    responses: Mutex<VecDeque<SourceResult<SnapshotUpdate>>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedSource {
    pub fn new(responses: Vec<SourceResult<SnapshotUpdate>>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            responses: Mutex::new(responses.into()),
            gate: None,
        }
    }

    pub fn gated(gate: Arc<Notify>, responses: Vec<SourceResult<SnapshotUpdate>>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(responses)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SnapshotSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch_snapshot(&self) -> SourceResult<SnapshotUpdate> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SourceError::Unavailable("script exhausted".to_string())))
    }
}

/// Boxed handle onto a shared scripted source
pub fn boxed(source: &Arc<ScriptedSource>) -> Box<dyn SnapshotSource> {
    Box::new(Arc::clone(source))
}
