use serde::{Deserialize, Serialize};

/// Upper bounds for an acceptable page. Unset metrics are not rated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VitalsThresholds {
    /// Largest contentful paint budget (ms).
    #[serde(default)]
    pub lcp: Option<f64>,
    /// First input delay budget (ms).
    #[serde(default)]
    pub fid: Option<f64>,
    #[serde(default)]
    pub cls: Option<f64>,
}
