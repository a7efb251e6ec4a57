use std::path::Path;

use anyhow::{Context, Result};
use pagepulse_timing::{NavigationTimingRecord, PerformanceTimeline, TimingBatch};
use serde::{Deserialize, Serialize};

/// A recorded page load: the navigation record plus every timing batch in
/// delivery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTrace {
    pub page_url: String,
    #[serde(default)]
    pub navigation: Option<NavigationTimingRecord>,
    #[serde(default)]
    pub batches: Vec<TimingBatch>,
}

impl PageTrace {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read trace {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("invalid trace {}", path.display()))
    }

    /// Feeds the trace into `timeline`. Subscribers must already be attached.
    pub fn replay(&self, timeline: &PerformanceTimeline) {
        if let Some(record) = self.navigation {
            timeline.set_navigation(record);
        }
        for batch in &self.batches {
            timeline.dispatch(batch.clone());
        }
        tracing::debug!(
            target: "pagepulse",
            page_url = %self.page_url,
            batches = self.batches.len(),
            "trace replayed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trace_with_mixed_batches() {
        let trace: PageTrace = serde_json::from_str(
            r#"{
                "pageUrl": "https://shop.test/",
                "navigation": { "fetchStart": 0, "loadEventEnd": 812.5 },
                "batches": [
                    { "entryType": "paint", "entries": [{ "name": "first-contentful-paint", "startTime": 120 }] },
                    { "entryType": "first-input", "entries": [{ "startTime": 900, "processingStart": 905 }] }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(trace.batches.len(), 2);
        assert_eq!(trace.navigation.unwrap().load_event_end, 812.5);
    }

    #[test]
    fn navigation_and_batches_are_optional() {
        let trace: PageTrace = serde_json::from_str(r#"{ "pageUrl": "about:blank" }"#).unwrap();
        assert!(trace.navigation.is_none());
        assert!(trace.batches.is_empty());
    }
}
