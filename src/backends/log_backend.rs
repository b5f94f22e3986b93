use std::time::Instant;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::Level;

use super::base::{CollectorBackend, ScopedTimer};

/// Configuration for the log collector backend.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct LogBackendConfig {
    pub level: String, // e.g. "info", "debug", "warn"
}

/// Backend that records elapsed times as log records via `tracing`.
pub struct LoggerBackend {
    level: Level,
}

impl LoggerBackend {
    pub fn new(level: Level) -> Self {
        LoggerBackend { level }
    }

    /// Builds the backend from config. Unknown levels are rejected so a
    /// typo in the config cannot silently demote measurements to TRACE.
    pub fn from_config(config: &LogBackendConfig) -> Result<Self, String> {
        let level = match config.level.trim().to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            other => {
                return Err(format!(
                    "Invalid log backend level '{}'. Valid values: trace, debug, info, warn, error",
                    other
                ));
            }
        };
        Ok(LoggerBackend::new(level))
    }
}

impl CollectorBackend for LoggerBackend {
    fn name_separator(&self) -> char {
        '.'
    }

    fn timer(&self, name: &str) -> Result<Box<dyn ScopedTimer>, String> {
        Ok(Box::new(LogTimer {
            name: name.to_string(),
            level: self.level,
            start: Instant::now(),
        }))
    }
}

/// Handle that emits one `"{name}: elapsed {secs}"` record when released.
/// `Instant` is monotonic, so wall-clock adjustments cannot corrupt the
/// measurement. No side effect happens before release.
struct LogTimer {
    name: String,
    level: Level,
    start: Instant,
}

impl ScopedTimer for LogTimer {}

impl Drop for LogTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed().as_secs_f64();
        // tracing macros take a const level, hence the dispatch here.
        match self.level {
            Level::TRACE => tracing::trace!("{}: elapsed {}", self.name, elapsed),
            Level::DEBUG => tracing::debug!("{}: elapsed {}", self.name, elapsed),
            Level::INFO => tracing::info!("{}: elapsed {}", self.name, elapsed),
            Level::WARN => tracing::warn!("{}: elapsed {}", self.name, elapsed),
            Level::ERROR => tracing::error!("{}: elapsed {}", self.name, elapsed),
        }
    }
}
