use std::collections::HashMap;
use std::sync::Mutex;

use prometheus::{Encoder, Histogram, HistogramOpts, HistogramTimer, Registry, TextEncoder};

use super::base::{CollectorBackend, ScopedTimer};

/// Backend that records elapsed times into a prometheus registry.
///
/// One histogram is created per distinct metric name, on first use, and
/// reused for every later call. Entries are never evicted: a pull-based
/// registry holds one instrument per name for the lifetime of the process,
/// so the cache grows with the number of distinct names ever profiled.
pub struct PrometheusBackend {
    registry: Registry,
    timers: Mutex<HashMap<String, Histogram>>,
}

impl PrometheusBackend {
    pub fn new() -> Self {
        PrometheusBackend {
            registry: Registry::new(),
            timers: Mutex::new(HashMap::new()),
        }
    }

    /// Renders all collected metrics in prometheus text format.
    pub fn render(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| format!("Failed to encode metrics: {}", e))?;
        String::from_utf8(buffer)
            .map_err(|e| format!("Metrics encoding produced invalid UTF-8: {}", e))
    }

    fn lookup_or_create(&self, name: &str) -> Result<Histogram, String> {
        // Lookup and insert happen under one lock acquisition, so two
        // threads racing on a new name cannot register twice.
        let mut timers = self
            .timers
            .lock()
            .expect("prometheus timer cache mutex poisoned");
        if let Some(histogram) = timers.get(name) {
            return Ok(histogram.clone());
        }

        let opts = HistogramOpts::new(name.to_string(), format!("Elapsed time for {}", name));
        let histogram = Histogram::with_opts(opts)
            .map_err(|e| format!("Failed to create histogram '{}': {}", name, e))?;
        self.registry
            .register(Box::new(histogram.clone()))
            .map_err(|e| format!("Failed to register histogram '{}': {}", name, e))?;
        timers.insert(name.to_string(), histogram.clone());
        Ok(histogram)
    }
}

impl Default for PrometheusBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopedTimer for HistogramTimer {}

impl CollectorBackend for PrometheusBackend {
    fn name_separator(&self) -> char {
        '_'
    }

    fn timer(&self, name: &str) -> Result<Box<dyn ScopedTimer>, String> {
        let histogram = self.lookup_or_create(name)?;
        Ok(Box::new(histogram.start_timer()))
    }
}
