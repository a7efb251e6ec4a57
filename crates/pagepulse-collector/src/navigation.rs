use pagepulse_timing::NavigationTimingRecord;
use serde::{Deserialize, Serialize};

/// Phase durations of the current navigation, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSnapshot {
    pub dns_time: f64,
    pub tcp_time: f64,
    pub ttfb: f64,
    pub dom_parse_time: f64,
    pub load_time: f64,
    pub redirect_time: f64,
    pub ssl_time: f64,
    pub response_time: f64,
    pub dom_content_loaded: f64,
    pub first_byte: f64,
    pub interactive: f64,
}

impl NavigationSnapshot {
    /// Derives the phase durations from `record`. A missing record yields
    /// all zeroes. Differences are not clamped.
    pub fn from_record(record: Option<&NavigationTimingRecord>) -> Self {
        let Some(t) = record else {
            return Self::default();
        };

        Self {
            dns_time: t.domain_lookup_end - t.domain_lookup_start,
            tcp_time: t.connect_end - t.connect_start,
            ttfb: t.response_start - t.request_start,
            dom_parse_time: t.dom_interactive - t.response_end,
            load_time: t.load_event_end - t.fetch_start,
            redirect_time: t.redirect_end - t.redirect_start,
            ssl_time: t.connect_end - t.secure_connection_start,
            response_time: t.response_end - t.response_start,
            dom_content_loaded: t.dom_content_loaded_event_end - t.dom_content_loaded_event_start,
            first_byte: t.response_start - t.fetch_start,
            interactive: t.dom_interactive - t.fetch_start,
        }
    }
}
