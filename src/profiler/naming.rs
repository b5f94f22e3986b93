//! Metric naming: pure helpers that turn a (group, name, block) triple
//! into a stable metric key.

/// Default namespace prefix for every profiling metric.
pub const PROFILE_NAMESPACE: &str = "functions_profile";

/// Default separator between metric name components.
pub const SEPARATOR: char = '.';

/// Group used when the caller does not pick one.
pub const DEFAULT_GROUP: &str = "other";

/// What is being measured. Only elapsed time today.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricMode {
    Time,
}

impl MetricMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricMode::Time => "time",
        }
    }
}

/// Joins group, name and an optional block into `{group}{sep}{name}`,
/// appending `{sep}{block}` when a non-empty block is given. Stateless,
/// so callers can predict a metric key without a profiler instance.
pub fn canonical_name(name: &str, group: &str, block: Option<&str>, separator: char) -> String {
    let mut path = format!("{}{}{}", group, separator, name);
    if let Some(block) = block.filter(|b| !b.is_empty()) {
        path.push(separator);
        path.push_str(block);
    }
    path
}

/// Derives a callable's bare name from its type, the way a function would
/// introspect its own identity. Closures come out as `{{closure}}`, so
/// prefer an explicit name override for those.
pub fn function_name<F>() -> &'static str {
    let full = std::any::type_name::<F>();
    full.rsplit("::").next().unwrap_or(full)
}
