//! Port for the council audit trail.
//!
//! Defines the [`CouncilLogger`] trait for recording council events (agent
//! outputs, evaluations, fallbacks, synthesis) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the run in a
//! machine-readable format (JSONL).

use serde_json::Value;

/// A structured council event for logging.
pub struct CouncilEvent {
    /// Event type identifier (e.g., "run_started", "agent_rejected", "evaluation").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl CouncilEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging council events.
///
/// `log` is synchronous and infallible; logging failures never disturb the run.
pub trait CouncilLogger: Send + Sync {
    fn log(&self, event: CouncilEvent);
}

/// No-op implementation for tests and when the audit log is disabled.
pub struct NoCouncilLogger;

impl CouncilLogger for NoCouncilLogger {
    fn log(&self, _event: CouncilEvent) {}
}
