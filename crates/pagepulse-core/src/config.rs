//! TOML collector configuration.
//!
//! ```toml
//! app_id = "shop-web"
//! report_url = "https://collector.example.com/perf"
//! sampling = 0.25
//! ignore_resources = ["img", "beacon"]
//!
//! [web_vitals]
//! lcp = 2500.0
//! cls = 0.1
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use pagepulse_collector::VitalsThresholds;
use pagepulse_report::DeliveryMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("app_id must not be empty")]
    MissingAppId,
    #[error("invalid report_url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("report_url must use http or https, got `{0}`")]
    UnsupportedScheme(String),
    #[error("sampling must be within 0.0..=1.0, got {0}")]
    InvalidSampling(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    pub app_id: String,
    pub report_url: String,
    /// Fraction of page loads to report. Unset reports every load.
    #[serde(default)]
    pub sampling: Option<f64>,
    #[serde(default)]
    pub web_vitals: Option<VitalsThresholds>,
    /// Initiator types left out of the reported resource list.
    #[serde(default)]
    pub ignore_resources: Vec<String>,
    #[serde(default = "default_true")]
    pub enable_resource_timing: bool,
    #[serde(default)]
    pub resource_timing_buffer_size: Option<usize>,
    /// Clear the resource log after each report.
    #[serde(default)]
    pub clear_resource_timings: bool,
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default)]
    pub delivery: DeliveryMode,
}

fn default_true() -> bool {
    true
}

fn default_settle_delay_ms() -> u64 {
    1000
}

impl PerformanceConfig {
    pub fn new(app_id: impl Into<String>, report_url: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            report_url: report_url.into(),
            sampling: None,
            web_vitals: None,
            ignore_resources: Vec::new(),
            enable_resource_timing: true,
            resource_timing_buffer_size: None,
            clear_resource_timings: false,
            settle_delay_ms: default_settle_delay_ms(),
            delivery: DeliveryMode::default(),
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks the config and returns the parsed report endpoint.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        if self.app_id.trim().is_empty() {
            return Err(ConfigError::MissingAppId);
        }
        if let Some(rate) = self.sampling {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::InvalidSampling(rate));
            }
        }
        self.endpoint()
    }

    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.report_url).map_err(|source| ConfigError::InvalidUrl {
            url: self.report_url.clone(),
            source,
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}
