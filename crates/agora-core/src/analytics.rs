//! Fire-and-forget analytics. Emission never affects dispatch outcome.

use dashmap::DashMap;
use serde_json::Value;

/// Event sink consumed by the dispatcher and the chat surface. Infallible
/// on purpose: a failing emitter must not be able to fail a request.
pub trait AnalyticsEmitter: Send + Sync {
    fn emit(&self, event: &str, attributes: Value);
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NoopEmitter;

impl AnalyticsEmitter for NoopEmitter {
    fn emit(&self, _event: &str, _attributes: Value) {}
}

/// Logs each event and keeps a per-event counter.
#[derive(Debug, Default)]
pub struct TracingEmitter {
    counts: DashMap<String, u64>,
}

impl TracingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Times `event` has been emitted since startup.
    pub fn count(&self, event: &str) -> u64 {
        self.counts.get(event).map(|c| *c).unwrap_or(0)
    }
}

impl AnalyticsEmitter for TracingEmitter {
    fn emit(&self, event: &str, attributes: Value) {
        *self.counts.entry(event.to_string()).or_insert(0) += 1;
        tracing::debug!(event, %attributes, "analytics");
    }
}
