use std::sync::Arc;

use pagepulse_collector::MetricsDocument;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use url::Url;

use crate::{HttpTransport, ReportError, ReportPayload, Transport};

/// How [`Reporter::deliver`] hands a report to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Queue the send on a detached task and return immediately.
    #[default]
    Beacon,
    /// Await the request before returning.
    Request,
}

/// Fire-and-forget delivery of metrics documents.
///
/// Delivery failures are logged and swallowed; nothing is retried.
#[derive(Clone)]
pub struct Reporter {
    app_id: String,
    endpoint: Url,
    mode: DeliveryMode,
    transport: Arc<dyn Transport>,
}

impl Reporter {
    pub fn new(app_id: impl Into<String>, endpoint: Url) -> Result<Self, ReportError> {
        Ok(Self::with_transport(app_id, endpoint, Arc::new(HttpTransport::new()?)))
    }

    pub fn with_transport(
        app_id: impl Into<String>,
        endpoint: Url,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            endpoint,
            mode: DeliveryMode::default(),
            transport,
        }
    }

    pub fn with_mode(mut self, mode: DeliveryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn payload(&self, page_url: &str, metrics: MetricsDocument) -> ReportPayload {
        ReportPayload::new(self.app_id.clone(), page_url, metrics)
    }

    /// Sends `payload` once and surfaces the outcome.
    pub async fn try_send(&self, payload: &ReportPayload) -> Result<(), ReportError> {
        let body = serde_json::to_string(payload)?;
        self.transport.send(&self.endpoint, body).await
    }

    /// Sends `payload`, logging any failure instead of returning it.
    pub async fn report(&self, payload: &ReportPayload) {
        match self.try_send(payload).await {
            Ok(()) => tracing::info!(
                target: "pagepulse_report",
                endpoint = %self.endpoint,
                resources = payload.metrics.resources.len(),
                "report delivered"
            ),
            Err(error) => tracing::error!(
                target: "pagepulse_report",
                endpoint = %self.endpoint,
                error = %error,
                "performance report failed"
            ),
        }
    }

    /// Delivers according to the configured [`DeliveryMode`]. In beacon
    /// mode the returned handle may be dropped; the send still completes.
    pub async fn deliver(&self, payload: ReportPayload) -> Option<JoinHandle<()>> {
        match self.mode {
            DeliveryMode::Beacon => {
                let reporter = self.clone();
                Some(tokio::spawn(async move {
                    reporter.report(&payload).await;
                }))
            }
            DeliveryMode::Request => {
                self.report(&payload).await;
                None
            }
        }
    }
}
