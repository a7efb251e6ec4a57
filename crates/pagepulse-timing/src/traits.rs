use anyhow::Result;

use crate::{BatchSender, EntryCategory, NavigationTimingRecord};

/// Source of asynchronously delivered timing batches.
///
/// Implementations push every batch observed for `category` into `sink`
/// until the page context ends; there is no unsubscribe.
pub trait TimingSource: Send + Sync {
    fn subscribe(&self, category: EntryCategory, sink: BatchSender) -> Result<()>;

    /// Drops the source's own buffered resource history.
    fn discard_resource_history(&self);
}

pub trait NavigationSource: Send + Sync {
    fn navigation_record(&self) -> Option<NavigationTimingRecord>;
}

/// The host's generic user-timing facility.
pub trait UserTiming: Send + Sync {
    /// Records a named timestamp and returns it.
    fn mark(&self, name: &str) -> f64;

    /// Records the duration between two marks under `name` and returns it.
    fn measure(&self, name: &str, start_mark: &str, end_mark: &str) -> Result<f64>;
}
