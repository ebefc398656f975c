//! Reporting of failures that endpoint methods swallow.
//!
//! Write operations report success as a boolean and several lookups report
//! failure as `None` or an empty list. The underlying error is handed to a
//! [`DiagnosticSink`] instead of being returned.

use crate::error::Error;

/// Receives errors that an operation swallowed.
pub trait DiagnosticSink: Send + Sync {
    /// Called once per swallowed failure. `operation` names the endpoint
    /// method, e.g. `"kv.put"`.
    fn swallowed(&self, operation: &str, error: &Error);
}

/// Emits swallowed failures as `tracing` warnings. This is the default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn swallowed(&self, operation: &str, error: &Error) {
        tracing::warn!(operation, error = %error, "Consul request failed");
    }
}

/// Discards swallowed failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn swallowed(&self, _operation: &str, _error: &Error) {}
}
