use std::time::{SystemTime, UNIX_EPOCH};

use pagepulse_collector::MetricsDocument;
use serde::{Deserialize, Serialize};

/// Fields shared by every report from one application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonInfo {
    pub app_id: String,
    pub page_url: String,
    /// Unix timestamp in milliseconds at report time.
    pub timestamp: u64,
}

/// The JSON document delivered to the collector endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub common: CommonInfo,
    pub metrics: MetricsDocument,
}

impl ReportPayload {
    pub fn new(app_id: impl Into<String>, page_url: impl Into<String>, metrics: MetricsDocument) -> Self {
        Self {
            common: CommonInfo {
                app_id: app_id.into(),
                page_url: page_url.into(),
                timestamp: unix_millis(),
            },
            metrics,
        }
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
