use std::sync::Arc;

use super::base::{CollectorBackend, ScopedTimer};

/// An external statsd-style timing client: anything that can hand out a
/// scoped timer for a metric name. Elapsed-time semantics, delivery and
/// reconnection are the client's responsibility.
pub trait TimerClient: Send + Sync {
    fn start_timer(&self, name: &str) -> Box<dyn ScopedTimer>;
}

/// Backend that delegates timing to an already-configured statsd-style
/// client. A pure pass-through adapter; it performs no measurement itself.
pub struct StatsdBackend {
    statsd: Arc<dyn TimerClient>,
}

impl StatsdBackend {
    pub fn new(statsd: Arc<dyn TimerClient>) -> Self {
        StatsdBackend { statsd }
    }
}

impl CollectorBackend for StatsdBackend {
    fn name_separator(&self) -> char {
        '.'
    }

    fn timer(&self, name: &str) -> Result<Box<dyn ScopedTimer>, String> {
        Ok(self.statsd.start_timer(name))
    }
}
