use std::sync::Arc;

use anyhow::Result;
use pagepulse_collector::{
    spawn_aggregator, AggregatorHandle, MetricsDocument, ResourceMetric, SnapshotAssembler,
};
use pagepulse_report::{ReportPayload, Reporter};
use pagepulse_timing::{PerformanceTimeline, UserTiming};
use rand::Rng;
use tokio::task::JoinHandle;

use crate::config::PerformanceConfig;

/// Outcome of one collection cycle that was not sampled out.
#[derive(Debug)]
pub struct CollectionCycle {
    pub payload: ReportPayload,
    delivery: Option<JoinHandle<()>>,
}

impl CollectionCycle {
    /// Waits for a beacon-mode send to finish. Delivery errors have already
    /// been logged by the reporter.
    pub async fn flush(self) -> ReportPayload {
        if let Some(task) = self.delivery {
            if let Err(error) = task.await {
                tracing::warn!(target: "pagepulse", error = %error, "report task aborted");
            }
        }
        self.payload
    }
}

/// Page-level orchestration: owns the aggregator for one page context and
/// turns a page-load signal into one delivered report.
pub struct PerformanceMonitor {
    config: PerformanceConfig,
    timeline: Arc<PerformanceTimeline>,
    aggregator: AggregatorHandle,
    assembler: SnapshotAssembler,
    reporter: Reporter,
}

impl PerformanceMonitor {
    /// Must be called inside a tokio runtime.
    pub fn new(config: PerformanceConfig, timeline: Arc<PerformanceTimeline>) -> Result<Self> {
        let endpoint = config.validate()?;
        let reporter = Reporter::new(config.app_id.clone(), endpoint)?;
        Self::with_reporter(config, timeline, reporter)
    }

    pub fn with_reporter(
        config: PerformanceConfig,
        timeline: Arc<PerformanceTimeline>,
        reporter: Reporter,
    ) -> Result<Self> {
        config.validate()?;
        if let Some(size) = config.resource_timing_buffer_size {
            timeline.set_resource_buffer_size(size);
        }

        let aggregator = spawn_aggregator(timeline.clone());
        let mut assembler = SnapshotAssembler::new(aggregator.clone(), timeline.clone());
        if let Some(thresholds) = config.web_vitals {
            assembler = assembler.with_thresholds(thresholds);
        }
        let reporter = reporter.with_mode(config.delivery);

        tracing::info!(
            target: "pagepulse",
            app_id = %config.app_id,
            endpoint = %reporter.endpoint(),
            "performance monitor initialised"
        );

        Ok(Self {
            config,
            timeline,
            aggregator,
            assembler,
            reporter,
        })
    }

    pub fn config(&self) -> &PerformanceConfig {
        &self.config
    }

    pub fn timeline(&self) -> &Arc<PerformanceTimeline> {
        &self.timeline
    }

    pub fn aggregator(&self) -> &AggregatorHandle {
        &self.aggregator
    }

    /// Assembles the current document with the configured resource filters
    /// applied. Does not report.
    pub async fn collect(&self) -> Result<MetricsDocument> {
        let mut document = self.assembler.assemble().await?;
        document.resources = filter_resources(&self.config, document.resources);
        Ok(document)
    }

    /// Handles page-load-complete: waits the settle delay, applies the
    /// sampling gate, then assembles and reports one document.
    ///
    /// Returns `None` when this load was sampled out.
    pub async fn on_load(&self, page_url: &str) -> Result<Option<CollectionCycle>> {
        tokio::time::sleep(self.config.settle_delay()).await;

        if !self.sampled_in() {
            tracing::info!(target: "pagepulse", page_url, "page load sampled out");
            return Ok(None);
        }

        let document = self.collect().await?;
        let payload = self.reporter.payload(page_url, document);
        let delivery = self.reporter.deliver(payload.clone()).await;

        if self.config.clear_resource_timings {
            self.aggregator.clear_resources().await?;
        }

        Ok(Some(CollectionCycle { payload, delivery }))
    }

    fn sampled_in(&self) -> bool {
        match self.config.sampling {
            Some(rate) => rand::thread_rng().gen_bool(rate),
            None => true,
        }
    }

    pub fn mark(&self, name: &str) -> f64 {
        self.timeline.mark(name)
    }

    pub fn measure(&self, name: &str, start_mark: &str, end_mark: &str) -> Result<f64> {
        self.timeline.measure(name, start_mark, end_mark)
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.aggregator.shutdown().await?;
        Ok(())
    }
}

/// Applies `enable_resource_timing` and `ignore_resources` to a resource list.
pub fn filter_resources(
    config: &PerformanceConfig,
    resources: Vec<ResourceMetric>,
) -> Vec<ResourceMetric> {
    if !config.enable_resource_timing {
        return Vec::new();
    }
    if config.ignore_resources.is_empty() {
        return resources;
    }
    resources
        .into_iter()
        .filter(|metric| !config.ignore_resources.iter().any(|kind| *kind == metric.kind))
        .collect()
}
