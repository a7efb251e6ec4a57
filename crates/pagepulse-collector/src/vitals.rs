use pagepulse_timing::ResourceTiming;
use serde::{Deserialize, Serialize};

/// Core web vitals for the current page. Fields stay 0 until observed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WebVitals {
    /// First contentful paint (ms).
    pub fcp: f64,
    /// Latest largest-contentful-paint candidate (ms).
    pub lcp: f64,
    /// First input delay (ms).
    pub fid: f64,
    /// Layout shift score of the current session window.
    pub cls: f64,
}

/// Per-phase breakdown of one resource load.
///
/// Each value is a plain difference of two host timestamps and is not
/// clamped, so inconsistent upstream data can yield negative phases.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourcePhaseTiming {
    pub dns: f64,
    pub tcp: f64,
    pub ttfb: f64,
    pub download: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceMetric {
    pub name: String,
    /// Initiator type (`script`, `img`, `css`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: f64,
    /// Transferred bytes.
    pub size: u64,
    pub timing: ResourcePhaseTiming,
}

impl From<&ResourceTiming> for ResourceMetric {
    fn from(entry: &ResourceTiming) -> Self {
        Self {
            name: entry.name.clone(),
            kind: entry.initiator_type.clone(),
            duration: entry.duration,
            size: entry.transfer_size,
            timing: ResourcePhaseTiming {
                dns: entry.domain_lookup_end - entry.domain_lookup_start,
                tcp: entry.connect_end - entry.connect_start,
                ttfb: entry.response_start - entry.request_start,
                download: entry.response_end - entry.response_start,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_phases_are_unclamped_differences() {
        let entry = ResourceTiming {
            name: "https://cdn.test/app.css".into(),
            initiator_type: "link".into(),
            duration: 80.0,
            transfer_size: 2048,
            domain_lookup_start: 3.0,
            domain_lookup_end: 9.0,
            connect_start: 9.0,
            connect_end: 21.0,
            request_start: 21.0,
            response_start: 0.0,
            response_end: 60.0,
            ..ResourceTiming::default()
        };
        let metric = ResourceMetric::from(&entry);
        assert_eq!(metric.kind, "link");
        assert_eq!(metric.size, 2048);
        assert_eq!(metric.timing.dns, 6.0);
        assert_eq!(metric.timing.tcp, 12.0);
        assert_eq!(metric.timing.ttfb, -21.0);
        assert_eq!(metric.timing.download, 60.0);
    }

    #[test]
    fn resource_metric_serializes_initiator_as_type() {
        let metric = ResourceMetric::from(&ResourceTiming {
            name: "logo.png".into(),
            initiator_type: "img".into(),
            ..ResourceTiming::default()
        });
        let json = serde_json::to_value(&metric).unwrap();
        assert_eq!(json["type"], "img");
        assert!(json["timing"].get("download").is_some());
    }
}
