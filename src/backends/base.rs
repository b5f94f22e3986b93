use std::sync::Arc;

use tracing::info;

use super::log_backend::LoggerBackend;
use super::prometheus_backend::PrometheusBackend;
use crate::config::BackendConfig;

/// A scoped timing handle bracketing one measured region. The measurement
/// is committed exactly once, either by calling [`stop`](ScopedTimer::stop)
/// or when the handle drops (including during unwind).
pub trait ScopedTimer: Send {
    /// Finalize the measurement. Dropping the handle has the same effect.
    fn stop(self: Box<Self>) {}
}

/// A timing handle whose acquisition and release do nothing. Handed out
/// when timer acquisition fails, so callers always hold a usable handle.
pub struct NoopTimer;

impl ScopedTimer for NoopTimer {}

/// The CollectorBackend trait abstracts where timing measurements go
/// (logs, a statsd-style client, a prometheus registry).
pub trait CollectorBackend: Send + Sync {
    /// Separator used when joining metric name components for this backend.
    fn name_separator(&self) -> char;

    /// Returns a scoped handle that records the elapsed time for `name`
    /// when released. Safe to call concurrently from multiple threads.
    fn timer(&self, name: &str) -> Result<Box<dyn ScopedTimer>, String>;
}

/// Creates a concrete backend implementation based on the BackendConfig.
/// The statsd backend needs a live client object and is constructed
/// directly via [`StatsdBackend::new`](super::statsd_backend::StatsdBackend::new).
pub fn create_backend(config: &BackendConfig) -> Result<Arc<dyn CollectorBackend>, String> {
    match config {
        BackendConfig::Log(cfg) => {
            let backend = LoggerBackend::from_config(cfg)?;
            info!("Created log collector backend.");
            Ok(Arc::new(backend))
        }
        BackendConfig::Prometheus => {
            info!("Created prometheus collector backend.");
            Ok(Arc::new(PrometheusBackend::new()))
        }
    }
}
