use tokio::sync::{mpsc, oneshot};

use crate::error::CollectorError;
use crate::vitals::{ResourceMetric, WebVitals};

#[derive(Debug)]
pub enum AggregatorRequest {
    SnapshotWebVitals {
        reply: oneshot::Sender<WebVitals>,
    },
    SnapshotResources {
        reply: oneshot::Sender<Vec<ResourceMetric>>,
    },
    ClearResources {
        reply: oneshot::Sender<()>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Cloneable handle to the aggregator service loop.
#[derive(Clone, Debug)]
pub struct AggregatorHandle {
    tx: mpsc::UnboundedSender<AggregatorRequest>,
}

impl AggregatorHandle {
    pub fn new(tx: mpsc::UnboundedSender<AggregatorRequest>) -> Self {
        Self { tx }
    }

    async fn round_trip<T, F>(&self, build_request: F) -> Result<T, CollectorError>
    where
        F: FnOnce(oneshot::Sender<T>) -> AggregatorRequest,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(build_request(reply_tx))
            .map_err(|_| CollectorError::RequestChannelClosed)?;
        reply_rx
            .await
            .map_err(|_| CollectorError::ReplyChannelClosed)
    }

    pub async fn snapshot_web_vitals(&self) -> Result<WebVitals, CollectorError> {
        self.round_trip(|reply| AggregatorRequest::SnapshotWebVitals { reply })
            .await
    }

    pub async fn snapshot_resources(&self) -> Result<Vec<ResourceMetric>, CollectorError> {
        self.round_trip(|reply| AggregatorRequest::SnapshotResources { reply })
            .await
    }

    pub async fn clear_resources(&self) -> Result<(), CollectorError> {
        self.round_trip(|reply| AggregatorRequest::ClearResources { reply })
            .await
    }

    pub async fn shutdown(&self) -> Result<(), CollectorError> {
        self.round_trip(|reply| AggregatorRequest::Shutdown { reply })
            .await
    }
}
