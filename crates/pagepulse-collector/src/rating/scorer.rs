use serde::{Deserialize, Serialize};

use super::VitalsThresholds;
use crate::vitals::WebVitals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Good,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VitalsRatings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lcp: Option<Rating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fid: Option<Rating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cls: Option<Rating>,
}

impl VitalsRatings {
    pub fn score(vitals: &WebVitals, thresholds: &VitalsThresholds) -> Self {
        Self {
            lcp: thresholds.lcp.map(|limit| rate(vitals.lcp, limit)),
            fid: thresholds.fid.map(|limit| rate(vitals.fid, limit)),
            cls: thresholds.cls.map(|limit| rate(vitals.cls, limit)),
        }
    }

    /// Names of the metrics rated [`Rating::Poor`].
    pub fn poor(&self) -> Vec<&'static str> {
        [("lcp", self.lcp), ("fid", self.fid), ("cls", self.cls)]
            .into_iter()
            .filter(|(_, rating)| *rating == Some(Rating::Poor))
            .map(|(name, _)| name)
            .collect()
    }
}

fn rate(value: f64, limit: f64) -> Rating {
    if value > limit {
        Rating::Poor
    } else {
        Rating::Good
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_configured_metrics_are_rated() {
        let vitals = WebVitals {
            fcp: 800.0,
            lcp: 3100.0,
            fid: 40.0,
            cls: 0.05,
        };
        let thresholds = VitalsThresholds {
            lcp: Some(2500.0),
            fid: Some(100.0),
            cls: None,
        };
        let ratings = VitalsRatings::score(&vitals, &thresholds);
        assert_eq!(ratings.lcp, Some(Rating::Poor));
        assert_eq!(ratings.fid, Some(Rating::Good));
        assert_eq!(ratings.cls, None);
        assert_eq!(ratings.poor(), vec!["lcp"]);
    }

    #[test]
    fn value_at_threshold_is_good() {
        let vitals = WebVitals {
            cls: 0.1,
            ..WebVitals::default()
        };
        let thresholds = VitalsThresholds {
            cls: Some(0.1),
            ..VitalsThresholds::default()
        };
        assert_eq!(VitalsRatings::score(&vitals, &thresholds).cls, Some(Rating::Good));
    }
}
