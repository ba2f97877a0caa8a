//! Logging collaborator for failed setting writes
//!
//! Setting handles never propagate write failures. Each failure is reported
//! exactly once to a [`WriteFailureSink`] and then swallowed:
//! - [`TracingSink`]: emits a `tracing` warning (the default)
//! - [`RecordingSink`]: keeps the reports in memory for inspection
//! - [`NoOpSink`]: discards them

use crate::error::WriteError;
use parking_lot::Mutex;

/// Receiver of failed-write reports
pub trait WriteFailureSink: Send + Sync {
    /// Report a failed write at warning level
    ///
    /// # Arguments
    /// * `message` - Human readable description naming the value and the setting
    /// * `error` - The underlying failure
    fn warn(&self, message: &str, error: &WriteError);
}

/// Sink forwarding reports to `tracing` at WARN level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WriteFailureSink for TracingSink {
    fn warn(&self, message: &str, error: &WriteError) {
        tracing::warn!(error = %error, "{}", message);
    }
}

/// No-op sink for hosts that do not want write failures reported
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl WriteFailureSink for NoOpSink {
    fn warn(&self, _message: &str, _error: &WriteError) {}
}

/// A failed write captured by [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailure {
    pub message: String,
    /// Rendered error
    pub error: String,
}

/// Sink that keeps every report in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    failures: Mutex<Vec<WriteFailure>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the reports received so far
    pub fn failures(&self) -> Vec<WriteFailure> {
        self.failures.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.failures.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.lock().is_empty()
    }

    /// Drop all recorded reports
    pub fn clear(&self) {
        self.failures.lock().clear();
    }
}

impl WriteFailureSink for RecordingSink {
    fn warn(&self, message: &str, error: &WriteError) {
        self.failures.lock().push(WriteFailure {
            message: message.to_string(),
            error: error.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        assert!(sink.is_empty());

        sink.warn("first", &WriteError::TargetBusy);
        sink.warn("second", &WriteError::ReadOnly("port"));

        let failures = sink.failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].message, "first");
        assert_eq!(failures[0].error, "target object is already borrowed");
        assert_eq!(failures[1].error, "member 'port' is read-only");

        sink.clear();
        assert_eq!(sink.len(), 0);
    }

    #[test]
    fn test_tracing_sink_does_not_panic_without_subscriber() {
        TracingSink.warn("no subscriber installed", &WriteError::TargetBusy);
        NoOpSink.warn("discarded", &WriteError::TargetBusy);
    }
}
