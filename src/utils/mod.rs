pub mod logger;
pub mod throttle;

pub use logger::init_logging;
pub use throttle::LogThrottle;
