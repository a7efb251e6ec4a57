pub mod entry;
pub mod error;
pub mod navigation;
pub mod timeline;
pub mod traits;

pub use entry::{
    BatchSender, EntryCategory, FirstInputTiming, LargestContentfulPaint, LayoutShift,
    PaintTiming, ResourceTiming, TimingBatch,
};
pub use error::TimingError;
pub use navigation::NavigationTimingRecord;
pub use timeline::PerformanceTimeline;
pub use traits::{NavigationSource, TimingSource, UserTiming};
