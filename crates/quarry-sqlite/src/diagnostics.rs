//! Diagnostics reporting.
//!
//! The grammar never fails a caller over a degraded condition it can absorb
//! (a missing index, an unsupported rename). Those conditions are reported
//! through a [`DiagnosticSink`] instead, so callers choose where the noise
//! goes and tests can assert on the exact messages.

use tracing::{error, warn};

/// Receives non-fatal anomalies from the grammar.
///
/// Implementations must be safe to share across threads; the grammar itself
/// never serializes access.
pub trait DiagnosticSink: Send + Sync {
    /// Reports a condition the grammar worked around.
    fn warning(&self, message: &str);

    /// Reports a failure the grammar absorbed.
    fn error(&self, message: &str);
}

/// Forwards diagnostics to the active `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn warning(&self, message: &str) {
        warn!("{message}");
    }

    fn error(&self, message: &str) {
        error!("{message}");
    }
}

#[cfg(test)]
pub(crate) use recording::RecordingSink;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_call_order() {
        let sink = RecordingSink::default();
        sink.warning("first");
        sink.error("second");

        assert_eq!(
            sink.entries(),
            vec![
                ("warning", "first".to_string()),
                ("error", "second".to_string()),
            ]
        );
    }

    #[test]
    fn test_tracing_sink_is_silent_without_subscriber() {
        // Must not panic when no subscriber is installed.
        let sink = TracingSink;
        sink.warning("noop");
        sink.error("noop");
    }
}
