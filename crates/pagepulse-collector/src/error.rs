use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("aggregator request channel closed")]
    RequestChannelClosed,
    #[error("aggregator reply channel closed")]
    ReplyChannelClosed,
}
