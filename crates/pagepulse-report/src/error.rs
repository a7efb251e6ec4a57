use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("report transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("collector responded with status {0}")]
    Status(u16),
}
