use thiserror::Error;

use crate::EntryCategory;

#[derive(Debug, Error)]
pub enum TimingError {
    #[error("entry type `{0}` is not supported by this timeline")]
    Unsupported(EntryCategory),
    #[error("no mark named `{0}`")]
    UnknownMark(String),
}
