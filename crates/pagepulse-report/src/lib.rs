pub mod error;
pub mod payload;
pub mod reporter;
pub mod transport;

pub use error::ReportError;
pub use payload::{CommonInfo, ReportPayload};
pub use reporter::{DeliveryMode, Reporter};
pub use transport::{HttpTransport, Transport};
