//! Port for structured invocation logging.
//!
//! Defines the [`InvocationLogger`] trait for recording tool calls and their
//! results to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures every
//! invocation in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured invocation event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The adapter adds the timestamp.
#[derive(Debug, Clone)]
pub struct InvocationEvent {
    /// Event type identifier ("tool_call", "tool_result").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl InvocationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging invocation events to a structured log.
///
/// The `log` method is synchronous and non-fallible; logging failures
/// never affect the invocation.
pub trait InvocationLogger: Send + Sync {
    /// Record an invocation event.
    fn log(&self, event: InvocationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoInvocationLogger;

impl InvocationLogger for NoInvocationLogger {
    fn log(&self, _event: InvocationEvent) {}
}
