pub mod naming;
pub mod profiler;

// Re-export the primary profiler items so code outside can do
// "use timeotron::profiler::{Profiler, canonical_name};"
pub use naming::{
    canonical_name, function_name, MetricMode, DEFAULT_GROUP, PROFILE_NAMESPACE, SEPARATOR,
};
pub use profiler::Profiler;
