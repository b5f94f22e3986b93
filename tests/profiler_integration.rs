mod common;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use figment::{
    providers::{Format, Yaml},
    Figment,
};
use timeotron::backends::{PrometheusBackend, ScopedTimer, StatsdBackend};
use timeotron::config::{Config, ConfigV1};
use timeotron::profiler::Profiler;

use common::{RecordingBackend, RecordingClient};

const TEST_CONFIG: &str = r#"
version: "1.0.0"
logging:
  level: "debug"
  format: "console"
profiler:
  namespace: "functions_profile"
  type: "prometheus"
"#;

fn load_test_config(yaml: &str) -> ConfigV1 {
    let config: Config = Figment::new()
        .merge(Yaml::string(yaml))
        .extract()
        .expect("Failed to parse test config YAML");

    match config {
        Config::ConfigV1(cfg) => cfg,
    }
}

/// A profiler built from config picks up the backend's separator.
#[test]
fn test_profiler_from_config_uses_backend_separator() {
    let config = load_test_config(TEST_CONFIG);
    let profiler = Profiler::from_config(&config.profiler).expect("profiler should build");

    assert_eq!(
        profiler.profiling_metric_name("work", "jobs", Some("setup"), None),
        "functions_profile_time_jobs_work_setup"
    );
}

#[test]
fn test_profiler_from_log_config() {
    let yaml = r#"
version: "1.0.0"
profiler:
  type: "log"
  level: "info"
"#;
    let config = load_test_config(yaml);
    let profiler = Profiler::from_config(&config.profiler).expect("profiler should build");

    assert_eq!(
        profiler.profiling_metric_name("work", "jobs", None, None),
        "functions_profile.time.jobs.work"
    );
    // No subscriber installed; releasing the handle is still safe.
    profiler.profile_block("work", "jobs", None).stop();
}

/// End to end: a profiled block lands in the prometheus registry under
/// the full underscore-separated key.
#[test]
fn test_prometheus_profiler_records_measurement() {
    let backend = Arc::new(PrometheusBackend::new());
    let profiler = Profiler::new(backend.clone());

    profiler.profile_block("work", "jobs", Some("setup")).stop();
    profiler.profile_block("work", "jobs", Some("setup")).stop();

    let rendered = backend.render().expect("render");
    assert!(rendered.contains("functions_profile_time_jobs_work_setup_count 2"));
}

/// End to end: the statsd backend hands the computed key to the external
/// client untouched.
#[test]
fn test_statsd_profiler_delegates_computed_name() {
    let client = RecordingClient::new();
    let profiler = Profiler::new(Arc::new(StatsdBackend::new(client.clone())));

    profiler.profile_block("work", "jobs", None).stop();

    assert_eq!(
        client.recorded_names(),
        ["functions_profile.time.jobs.work"]
    );
}

#[test]
fn test_wrapped_function_profiles_every_call() {
    let backend = RecordingBackend::new();
    let profiler = Profiler::new(backend.clone());

    let mut wrapped = profiler.wrap(Some("ingest"), Some("pipeline"), || 21 * 2);
    assert_eq!(wrapped(), 42);
    assert_eq!(wrapped(), 42);

    assert_eq!(
        backend.recorded_names(),
        [
            "functions_profile.time.pipeline.ingest",
            "functions_profile.time.pipeline.ingest"
        ]
    );
    assert_eq!(backend.release_count(), 2);
}

/// Profiling failures stay inside the profiling layer; the wrapped
/// callable still runs and its result still comes back.
#[test]
fn test_failing_backend_is_transparent_to_callers() {
    let backend = RecordingBackend::failing();
    let profiler = Profiler::new(backend.clone());

    let mut wrapped = profiler.wrap(Some("ingest"), Some("pipeline"), || 42);
    assert_eq!(wrapped(), 42);

    profiler.profile_block("work", "jobs", None).stop();
    assert_eq!(backend.release_count(), 0);
}

/// A panic from the wrapped callable reaches the caller unchanged, after
/// the measurement was finalized.
#[test]
fn test_business_panic_propagates_through_wrapper() {
    let backend = RecordingBackend::new();
    let profiler = Profiler::new(backend.clone());

    let mut wrapped = profiler.wrap(Some("doomed"), None, || -> u32 {
        panic!("business failure")
    });

    let result = catch_unwind(AssertUnwindSafe(|| wrapped()));
    assert!(result.is_err());
    assert_eq!(backend.release_count(), 1);
}

/// Two profilers with different backends coexist without interfering.
#[test]
fn test_profilers_with_different_backends_coexist() {
    let recording = RecordingBackend::new();
    let prometheus = Arc::new(PrometheusBackend::new());

    let first = Profiler::new(recording.clone());
    let second = Profiler::new(prometheus.clone());

    first.profile_block("work", "jobs", None).stop();
    second.profile_block("work", "jobs", None).stop();

    assert_eq!(
        first.profiling_metric_name("work", "jobs", None, None),
        "functions_profile.time.jobs.work"
    );
    assert_eq!(
        second.profiling_metric_name("work", "jobs", None, None),
        "functions_profile_time_jobs_work"
    );
    assert_eq!(recording.recorded_names().len(), 1);
    assert!(prometheus
        .render()
        .expect("render")
        .contains("functions_profile_time_jobs_work_count 1"));
}
