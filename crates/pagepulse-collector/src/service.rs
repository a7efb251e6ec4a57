use std::sync::Arc;

use pagepulse_timing::{EntryCategory, TimingBatch, TimingSource};
use tokio::sync::mpsc;

use crate::aggregator::MetricAggregator;
use crate::handle::{AggregatorHandle, AggregatorRequest};

/// Subscribes a fresh aggregator to every entry category of `source` and
/// spawns its service loop. Must be called inside a tokio runtime.
///
/// A category the source cannot deliver is logged and skipped; its
/// metrics keep their zero defaults.
pub fn spawn_aggregator(source: Arc<dyn TimingSource>) -> AggregatorHandle {
    let (batch_tx, batch_rx) = mpsc::unbounded_channel();
    for category in EntryCategory::ALL {
        if let Err(error) = source.subscribe(category, batch_tx.clone()) {
            tracing::warn!(
                target: "pagepulse_collector",
                %category,
                error = %error,
                "timing category unavailable"
            );
        }
    }
    drop(batch_tx);

    let (request_tx, request_rx) = mpsc::unbounded_channel();
    tokio::spawn(run(batch_rx, request_rx, source));
    AggregatorHandle::new(request_tx)
}

pub async fn run(
    mut batches: mpsc::UnboundedReceiver<TimingBatch>,
    mut requests: mpsc::UnboundedReceiver<AggregatorRequest>,
    source: Arc<dyn TimingSource>,
) {
    tracing::info!(target: "pagepulse_collector", "service loop started");
    let mut aggregator = MetricAggregator::new();

    loop {
        tokio::select! {
            biased;
            Some(batch) = batches.recv() => apply(&mut aggregator, batch),
            request = requests.recv() => {
                let Some(request) = request else {
                    break;
                };
                // Anything already delivered must be visible to this request.
                while let Ok(batch) = batches.try_recv() {
                    apply(&mut aggregator, batch);
                }
                match request {
                    AggregatorRequest::SnapshotWebVitals { reply } => {
                        let _ = reply.send(aggregator.snapshot_web_vitals());
                    }
                    AggregatorRequest::SnapshotResources { reply } => {
                        let _ = reply.send(aggregator.snapshot_resources());
                    }
                    AggregatorRequest::ClearResources { reply } => {
                        tracing::info!(
                            target: "pagepulse_collector",
                            cleared = aggregator.resource_count(),
                            "ClearResources"
                        );
                        aggregator.clear_resources();
                        source.discard_resource_history();
                        let _ = reply.send(());
                    }
                    AggregatorRequest::Shutdown { reply } => {
                        tracing::info!(target: "pagepulse_collector", "Shutdown - exiting service loop");
                        let _ = reply.send(());
                        break;
                    }
                }
            }
        }
    }

    tracing::info!(target: "pagepulse_collector", "service loop exited");
}

fn apply(aggregator: &mut MetricAggregator, batch: TimingBatch) {
    tracing::trace!(
        target: "pagepulse_collector",
        category = %batch.category(),
        entries = batch.len(),
        "ingest"
    );
    aggregator.ingest(batch);
}
