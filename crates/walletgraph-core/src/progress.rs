//! Progress reporting for long-running history queries.
//!
//! The fetch loop publishes human-readable progress events to an injected
//! [`ProgressSink`] rather than a process-global log. Embedders that render
//! a log panel collect them with [`MemorySink`]; [`TracingSink`] forwards
//! them to the `tracing` pipeline; [`NullSink`] is the silent default.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

// ─── ProgressEvent ───────────────────────────────────────────────────────────

/// One human-readable progress message with its emission time.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressEvent {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ProgressEvent {
    /// Create an event stamped with the current time.
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

// ─── ProgressSink ────────────────────────────────────────────────────────────

/// Receiver for progress events.
///
/// The pipeline only ever writes to the sink, it never reads back, and it
/// may publish from whichever task drives the query. Implementations must
/// therefore be `Send + Sync` and tolerate interleaved publishers.
pub trait ProgressSink: Send + Sync {
    fn publish(&self, event: ProgressEvent);
}

/// Collects events in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event published so far.
    pub fn snapshot(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Just the message strings, for assertions and log panels.
    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }
}

impl ProgressSink for MemorySink {
    fn publish(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Forwards every message to `tracing` at info level.
#[derive(Debug, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn publish(&self, event: ProgressEvent) {
        tracing::info!(target: "walletgraph::progress", "{}", event.message);
    }
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn publish(&self, _event: ProgressEvent) {}
}

// ─── Tests ────────────────────────────────────────────────────────────────────
