use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

use crate::ReportError;

/// Outbound channel for encoded reports.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, endpoint: &Url, body: String) -> Result<(), ReportError>;
}

/// POSTs reports as `application/json`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ReportError> {
        let client = Client::builder()
            .user_agent(concat!("pagepulse/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, endpoint: &Url, body: String) -> Result<(), ReportError> {
        let response = self
            .client
            .post(endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::Status(status.as_u16()));
        }
        Ok(())
    }
}
