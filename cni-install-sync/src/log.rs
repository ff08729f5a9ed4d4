//! Logging capability injected into the synchronizer.

/// Sink for the synchronizer's per-decision log lines.
pub trait InstallLog {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
}

/// Forwards to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl InstallLog for TracingLog {
    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }
}
