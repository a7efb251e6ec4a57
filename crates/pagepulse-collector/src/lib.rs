pub mod aggregator;
pub mod assembler;
pub mod cls;
pub mod error;
pub mod handle;
pub mod navigation;
pub mod rating;
pub mod service;
pub mod vitals;

pub use aggregator::MetricAggregator;
pub use assembler::{MetricsDocument, SnapshotAssembler};
pub use error::CollectorError;
pub use handle::{AggregatorHandle, AggregatorRequest};
pub use navigation::NavigationSnapshot;
pub use rating::{Rating, VitalsRatings, VitalsThresholds};
pub use service::spawn_aggregator;
pub use vitals::{ResourceMetric, ResourcePhaseTiming, WebVitals};
