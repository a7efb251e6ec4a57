use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Channel end a timing source pushes delivered batches into.
pub type BatchSender = mpsc::UnboundedSender<TimingBatch>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryCategory {
    Paint,
    LargestContentfulPaint,
    FirstInput,
    LayoutShift,
    Resource,
}

impl EntryCategory {
    pub const ALL: [EntryCategory; 5] = [
        EntryCategory::Paint,
        EntryCategory::LargestContentfulPaint,
        EntryCategory::FirstInput,
        EntryCategory::LayoutShift,
        EntryCategory::Resource,
    ];
}

impl std::fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EntryCategory::Paint => "paint",
            EntryCategory::LargestContentfulPaint => "largest-contentful-paint",
            EntryCategory::FirstInput => "first-input",
            EntryCategory::LayoutShift => "layout-shift",
            EntryCategory::Resource => "resource",
        };
        write!(f, "{label}")
    }
}

/// A `paint` entry (`first-paint`, `first-contentful-paint`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintTiming {
    #[serde(default)]
    pub name: String,
    pub start_time: f64,
}

/// One largest-contentful-paint candidate. Later candidates supersede earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LargestContentfulPaint {
    pub start_time: f64,
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstInputTiming {
    #[serde(default)]
    pub name: String,
    pub start_time: f64,
    pub processing_start: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutShift {
    pub start_time: f64,
    pub value: f64,
    /// Set when the shift followed user input within the exclusion window.
    #[serde(default)]
    pub had_recent_input: bool,
}

/// A resource-timing entry. Phase timestamps are absolute and default to 0
/// when the host does not expose them (cross-origin, cache hits).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceTiming {
    pub name: String,
    pub initiator_type: String,
    pub start_time: f64,
    pub duration: f64,
    pub transfer_size: u64,
    pub domain_lookup_start: f64,
    pub domain_lookup_end: f64,
    pub connect_start: f64,
    pub connect_end: f64,
    pub request_start: f64,
    pub response_start: f64,
    pub response_end: f64,
}

/// One delivery from the timing source: entries of a single category in
/// the order the host observed them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entryType", content = "entries", rename_all = "kebab-case")]
pub enum TimingBatch {
    Paint(Vec<PaintTiming>),
    LargestContentfulPaint(Vec<LargestContentfulPaint>),
    FirstInput(Vec<FirstInputTiming>),
    LayoutShift(Vec<LayoutShift>),
    Resource(Vec<ResourceTiming>),
}

impl TimingBatch {
    pub fn category(&self) -> EntryCategory {
        match self {
            TimingBatch::Paint(_) => EntryCategory::Paint,
            TimingBatch::LargestContentfulPaint(_) => EntryCategory::LargestContentfulPaint,
            TimingBatch::FirstInput(_) => EntryCategory::FirstInput,
            TimingBatch::LayoutShift(_) => EntryCategory::LayoutShift,
            TimingBatch::Resource(_) => EntryCategory::Resource,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TimingBatch::Paint(entries) => entries.len(),
            TimingBatch::LargestContentfulPaint(entries) => entries.len(),
            TimingBatch::FirstInput(entries) => entries.len(),
            TimingBatch::LayoutShift(entries) => entries.len(),
            TimingBatch::Resource(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_uses_browser_entry_type_names() {
        let raw = r#"{
            "entryType": "layout-shift",
            "entries": [
                { "startTime": 10.0, "value": 0.1 },
                { "startTime": 20.0, "value": 0.2, "hadRecentInput": true }
            ]
        }"#;
        let batch: TimingBatch = serde_json::from_str(raw).expect("valid batch");
        assert_eq!(batch.category(), EntryCategory::LayoutShift);
        assert_eq!(batch.len(), 2);
        let TimingBatch::LayoutShift(entries) = batch else {
            panic!("expected layout-shift batch");
        };
        assert!(!entries[0].had_recent_input);
        assert!(entries[1].had_recent_input);
    }

    #[test]
    fn resource_phases_default_to_zero() {
        let raw = r#"{
            "entryType": "resource",
            "entries": [{ "name": "https://cdn.test/app.js", "initiatorType": "script", "duration": 42.5 }]
        }"#;
        let batch: TimingBatch = serde_json::from_str(raw).expect("valid batch");
        let TimingBatch::Resource(entries) = batch else {
            panic!("expected resource batch");
        };
        assert_eq!(entries[0].initiator_type, "script");
        assert_eq!(entries[0].domain_lookup_end, 0.0);
        assert_eq!(entries[0].transfer_size, 0);
    }

    #[test]
    fn category_display_matches_entry_type() {
        for category in EntryCategory::ALL {
            let json = serde_json::to_string(&category).expect("serializable");
            assert_eq!(json, format!("\"{category}\""));
        }
    }
}
