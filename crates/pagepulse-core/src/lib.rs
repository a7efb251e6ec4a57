pub mod config;
pub mod monitor;
pub mod trace;

pub use config::{ConfigError, PerformanceConfig};
pub use monitor::{filter_resources, CollectionCycle, PerformanceMonitor};
pub use trace::PageTrace;
