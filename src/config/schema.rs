use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::players::ModelType;
use crate::scoring::WeightPreset;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8001";
pub const DEFAULT_CACHE_TTL: &str = "15m";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Page sizes offered by the dashboard
pub const PAGE_SIZES: [usize; 3] = [10, 20, 50];

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default)]
    pub default_model: ModelType,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Weights used when nothing has been saved yet, and to back-fill
    /// categories missing from the saved file
    #[serde(default)]
    pub default_preset: WeightPreset,

    /// Humantime duration, e.g. "15m" or "1h 30m"
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_page_size() -> usize {
    PAGE_SIZES[0]
}

fn default_cache_ttl() -> String {
    DEFAULT_CACHE_TTL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            default_model: ModelType::default(),
            page_size: default_page_size(),
            default_preset: WeightPreset::default(),
            cache_ttl: default_cache_ttl(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    pub fn cache_ttl(&self) -> Result<Duration, humantime::DurationError> {
        humantime::parse_duration(&self.cache_ttl)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Validate a loaded config.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let url = config.api_base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!(
            "api_base_url: must start with http:// or https://, got '{}'",
            config.api_base_url
        ));
    }

    if config.page_size == 0 {
        errors.push("page_size: must be greater than 0".to_string());
    }

    if let Err(e) = config.cache_ttl() {
        errors.push(format!("cache_ttl: invalid duration '{}': {}", config.cache_ttl, e));
    }

    if config.request_timeout_secs == 0 {
        errors.push("request_timeout_secs: must be greater than 0".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
