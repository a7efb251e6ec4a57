use pagepulse_timing::TimingBatch;

use crate::cls::LayoutShiftWindow;
use crate::vitals::{ResourceMetric, WebVitals};

/// Reduces timing batches into web vitals and the resource log.
///
/// Owned by the aggregator service loop; other components only ever see
/// copies handed out by the snapshot accessors.
#[derive(Debug, Default)]
pub struct MetricAggregator {
    vitals: WebVitals,
    fcp_resolved: bool,
    fid_resolved: bool,
    layout_shifts: LayoutShiftWindow,
    resources: Vec<ResourceMetric>,
}

impl MetricAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest(&mut self, batch: TimingBatch) {
        match batch {
            TimingBatch::Paint(entries) => {
                if self.fcp_resolved {
                    return;
                }
                if let Some(first) = entries.first() {
                    self.vitals.fcp = first.start_time;
                    self.fcp_resolved = true;
                }
            }
            TimingBatch::LargestContentfulPaint(entries) => {
                if let Some(latest) = entries.last() {
                    self.vitals.lcp = latest.start_time;
                }
            }
            TimingBatch::FirstInput(entries) => {
                if self.fid_resolved {
                    return;
                }
                if let Some(first) = entries.first() {
                    self.vitals.fid = first.processing_start - first.start_time;
                    self.fid_resolved = true;
                }
            }
            TimingBatch::LayoutShift(entries) => {
                for shift in &entries {
                    self.layout_shifts.record(shift);
                }
                self.vitals.cls = self.layout_shifts.value();
            }
            TimingBatch::Resource(entries) => {
                self.resources
                    .extend(entries.iter().map(ResourceMetric::from));
            }
        }
    }

    pub fn snapshot_web_vitals(&self) -> WebVitals {
        self.vitals
    }

    pub fn snapshot_resources(&self) -> Vec<ResourceMetric> {
        self.resources.clone()
    }

    /// Empties the local resource log. The service also tells the timing
    /// source to drop its own history.
    pub fn clear_resources(&mut self) {
        self.resources.clear();
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
}
