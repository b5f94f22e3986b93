use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::backends::log_backend::LogBackendConfig;
use crate::profiler::naming::PROFILE_NAMESPACE;

/// A wrapper for the profiler configuration:
/// - namespace: prefix for every metric key (defaults to "functions_profile").
/// - backend: the collector backend measurements are routed to.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct ProfilerConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(flatten)]
    pub backend: BackendConfig,
}

fn default_namespace() -> String {
    PROFILE_NAMESPACE.to_string()
}

/// The config-constructible collector backends. We differentiate them via
/// a "type" tag in the YAML. The statsd backend needs a live client
/// object, so it cannot be declared here.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
#[serde(tag = "type")]
pub enum BackendConfig {
    #[serde(rename = "log")]
    Log(LogBackendConfig),
    #[serde(rename = "prometheus")]
    Prometheus,
    // Add more variants here as needed.
}
