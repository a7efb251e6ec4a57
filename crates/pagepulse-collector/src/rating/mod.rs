pub mod scorer;
pub mod thresholds;

pub use scorer::{Rating, VitalsRatings};
pub use thresholds::VitalsThresholds;
