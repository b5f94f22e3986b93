use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize tracing from the logging config. Returns an error if the
/// level is unknown or a global subscriber is already installed.
pub fn init_logging(logging_config: &LoggingConfig) -> Result<(), String> {
    // Parse level string -> LevelFilter
    let level_filter = match logging_config.level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        other => {
            return Err(format!(
                "Invalid logging.level '{}'. Valid values: trace, debug, info, warn, error",
                other
            ));
        }
    };

    // This can be used to allow env-based overrides, plus the default:
    let filter_layer = EnvFilter::default().add_directive(level_filter.into());

    let registry = tracing_subscriber::registry().with(filter_layer);
    match logging_config.format.to_lowercase().as_str() {
        // Structured JSON output
        "json" => registry
            .with(fmt::layer().json())
            .try_init()
            .map_err(|e| format!("Failed to install tracing subscriber: {}", e)),
        // Human-readable console output; unknown formats fall back here
        _ => registry
            .with(fmt::layer().pretty())
            .try_init()
            .map_err(|e| format!("Failed to install tracing subscriber: {}", e)),
    }
}
