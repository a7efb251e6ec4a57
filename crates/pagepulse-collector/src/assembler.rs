use std::sync::Arc;

use pagepulse_timing::NavigationSource;
use serde::{Deserialize, Serialize};

use crate::error::CollectorError;
use crate::handle::AggregatorHandle;
use crate::navigation::NavigationSnapshot;
use crate::rating::{VitalsRatings, VitalsThresholds};
use crate::vitals::{ResourceMetric, WebVitals};

/// One point-in-time observation of the page's performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsDocument {
    pub navigation: NavigationSnapshot,
    pub web_vitals: WebVitals,
    pub resources: Vec<ResourceMetric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings: Option<VitalsRatings>,
}

/// Reads the navigation record and the aggregator's current state into a
/// [`MetricsDocument`]. Holds no state of its own, so repeated calls are
/// plain re-reads.
#[derive(Clone)]
pub struct SnapshotAssembler {
    aggregator: AggregatorHandle,
    navigation: Arc<dyn NavigationSource>,
    thresholds: Option<VitalsThresholds>,
}

impl SnapshotAssembler {
    pub fn new(aggregator: AggregatorHandle, navigation: Arc<dyn NavigationSource>) -> Self {
        Self {
            aggregator,
            navigation,
            thresholds: None,
        }
    }

    pub fn with_thresholds(mut self, thresholds: VitalsThresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub async fn assemble(&self) -> Result<MetricsDocument, CollectorError> {
        let record = self.navigation.navigation_record();
        if record.is_none() {
            tracing::debug!(target: "pagepulse_collector", "no navigation record; using zero snapshot");
        }
        let navigation = NavigationSnapshot::from_record(record.as_ref());

        let web_vitals = self.aggregator.snapshot_web_vitals().await?;
        let resources = self.aggregator.snapshot_resources().await?;

        let ratings = self
            .thresholds
            .as_ref()
            .map(|thresholds| VitalsRatings::score(&web_vitals, thresholds));
        if let Some(poor) = ratings.as_ref().map(VitalsRatings::poor) {
            if !poor.is_empty() {
                tracing::warn!(
                    target: "pagepulse_collector",
                    metrics = ?poor,
                    lcp = web_vitals.lcp,
                    fid = web_vitals.fid,
                    cls = web_vitals.cls,
                    "web vitals over threshold"
                );
            }
        }

        tracing::info!(
            target: "pagepulse_collector",
            resources = resources.len(),
            "metrics document assembled"
        );

        Ok(MetricsDocument {
            navigation,
            web_vitals,
            resources,
            ratings,
        })
    }
}
