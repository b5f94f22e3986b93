use std::sync::Arc;
use std::time::Duration;

use tracing::error;

use super::naming::{canonical_name, function_name, MetricMode, DEFAULT_GROUP, PROFILE_NAMESPACE};
use crate::backends::{create_backend, CollectorBackend, NoopTimer, ScopedTimer};
use crate::config::ProfilerConfig;
use crate::utils::throttle::LogThrottle;

/// Window for suppressing repeated profiling-error logs for one metric.
const ERROR_LOG_INTERVAL: Duration = Duration::from_secs(60);

/// Measures elapsed time around named functions and blocks and routes
/// every measurement to its collector backend.
///
/// The backend is fixed at construction. Several profilers with different
/// backends can coexist; cloning shares the backend and error throttle.
#[derive(Clone)]
pub struct Profiler {
    backend: Arc<dyn CollectorBackend>,
    namespace: String,
    throttle: Arc<LogThrottle>,
}

impl Profiler {
    pub fn new(backend: Arc<dyn CollectorBackend>) -> Self {
        Self::with_namespace(backend, PROFILE_NAMESPACE)
    }

    pub fn with_namespace(
        backend: Arc<dyn CollectorBackend>,
        namespace: impl Into<String>,
    ) -> Self {
        Profiler {
            backend,
            namespace: namespace.into(),
            throttle: Arc::new(LogThrottle::new(ERROR_LOG_INTERVAL)),
        }
    }

    /// Builds a profiler with the backend described by the config.
    pub fn from_config(config: &ProfilerConfig) -> Result<Self, String> {
        let backend = create_backend(&config.backend)?;
        Ok(Self::with_namespace(backend, config.namespace.clone()))
    }

    /// Full metric key for a profiled name:
    /// `{namespace}{sep}time{sep}{group}{sep}{name}[{sep}{block}]`.
    /// The separator comes from the backend unless overridden.
    pub fn profiling_metric_name(
        &self,
        name: &str,
        group: &str,
        block: Option<&str>,
        sep: Option<char>,
    ) -> String {
        let separator = sep.unwrap_or_else(|| self.backend.name_separator());
        let path = canonical_name(name, group, block, separator);
        format!(
            "{}{}{}{}{}",
            self.namespace,
            separator,
            MetricMode::Time.as_str(),
            separator,
            path
        )
    }

    /// Records timing for a function or a block inside a function. The
    /// returned handle commits the measurement when released, on normal
    /// exit or unwind.
    ///
    /// Profiling never breaks the profiled code path: if the backend
    /// cannot hand out a timer, the failure is logged and the caller gets
    /// a no-op handle instead.
    pub fn profile_block(
        &self,
        block_name: &str,
        group: &str,
        block: Option<&str>,
    ) -> Box<dyn ScopedTimer> {
        let metric_name = self.profiling_metric_name(block_name, group, block, None);
        match self.backend.timer(&metric_name) {
            Ok(timer) => timer,
            Err(e) => {
                if let Some(suppressed) = self.throttle.should_emit(&metric_name) {
                    if suppressed > 0 {
                        error!(
                            "Error profiling block {}: {} ({} similar errors suppressed)",
                            block_name, e, suppressed
                        );
                    } else {
                        error!("Error profiling block {}: {}", block_name, e);
                    }
                }
                Box::new(NoopTimer)
            }
        }
    }

    /// Shorthand for profiling a block under the default group.
    pub fn profile(&self, block_name: &str) -> Box<dyn ScopedTimer> {
        self.profile_block(block_name, DEFAULT_GROUP, None)
    }

    /// Wraps a callable so every invocation is profiled. The metric name
    /// is `name` when given, otherwise the callable's own name; the group
    /// defaults to "other".
    ///
    /// A panic raised by the callable itself propagates to the caller
    /// unchanged; the timing handle is released on the way out by unwind.
    pub fn wrap<F, R>(
        &self,
        name: Option<&str>,
        group: Option<&str>,
        mut func: F,
    ) -> impl FnMut() -> R
    where
        F: FnMut() -> R,
    {
        let name = name.unwrap_or_else(|| function_name::<F>()).to_string();
        let group = group.unwrap_or(DEFAULT_GROUP).to_string();
        let profiler = self.clone();
        move || {
            let _timer = profiler.profile_block(&name, &group, None);
            func()
        }
    }
}
