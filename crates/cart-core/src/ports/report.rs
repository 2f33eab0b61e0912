use std::error::Error;

/// Operator-visible error reporting. Implementations must not panic.
pub trait ReportSink: Send + Sync {
    fn report(&self, source: &str, error: &(dyn Error + 'static));
}

/// Reports through `tracing` at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ReportSink for TracingReporter {
    fn report(&self, source: &str, error: &(dyn Error + 'static)) {
        tracing::error!(source, error = %error, "cart error reported");
    }
}
