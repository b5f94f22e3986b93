use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use timeotron::backends::{CollectorBackend, NoopTimer, ScopedTimer, TimerClient};

/// Test backend that records every metric name it is asked to time and
/// counts how many handles were finalized.
pub struct RecordingBackend {
    names: Mutex<Vec<String>>,
    releases: Arc<AtomicUsize>,
    fail: bool,
}

impl RecordingBackend {
    pub fn new() -> Arc<Self> {
        Self::build(false)
    }

    pub fn failing() -> Arc<Self> {
        Self::build(true)
    }

    fn build(fail: bool) -> Arc<Self> {
        Arc::new(RecordingBackend {
            names: Mutex::new(Vec::new()),
            releases: Arc::new(AtomicUsize::new(0)),
            fail,
        })
    }

    pub fn recorded_names(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }

    pub fn release_count(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

pub struct CountingTimer(Arc<AtomicUsize>);

impl ScopedTimer for CountingTimer {}

impl Drop for CountingTimer {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl CollectorBackend for RecordingBackend {
    fn name_separator(&self) -> char {
        '.'
    }

    fn timer(&self, name: &str) -> Result<Box<dyn ScopedTimer>, String> {
        if self.fail {
            return Err("backend unavailable".to_string());
        }
        self.names.lock().unwrap().push(name.to_string());
        Ok(Box::new(CountingTimer(self.releases.clone())))
    }
}

/// Statsd-style client double for delegation tests.
pub struct RecordingClient {
    names: Mutex<Vec<String>>,
}

impl RecordingClient {
    pub fn new() -> Arc<Self> {
        Arc::new(RecordingClient {
            names: Mutex::new(Vec::new()),
        })
    }

    pub fn recorded_names(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }
}

impl TimerClient for RecordingClient {
    fn start_timer(&self, name: &str) -> Box<dyn ScopedTimer> {
        self.names.lock().unwrap().push(name.to_string());
        Box::new(NoopTimer)
    }
}
