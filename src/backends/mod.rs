pub mod base;
pub mod log_backend;
pub mod prometheus_backend;
pub mod statsd_backend;

// Re-export the primary backend items so code outside can do
// "use timeotron::backends::{CollectorBackend, create_backend};"
pub use base::{create_backend, CollectorBackend, NoopTimer, ScopedTimer};
pub use log_backend::LoggerBackend;
pub use prometheus_backend::PrometheusBackend;
pub use statsd_backend::{StatsdBackend, TimerClient};
