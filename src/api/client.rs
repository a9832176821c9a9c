use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};
use tracing::{debug, warn};

use super::cache::ResponseCache;
use super::error::ApiError;
use super::types::{AvailableModels, ModelComparison, PlayerHistory, PredictionRecord, RosterRecord};
use crate::players::ModelType;
use crate::scoring::StatCategory;

/// Typed client for the player statistics API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    cache: ResponseCache,
    /// When false, skip fresh cache hits and always ask the server first
    use_fresh_cache: bool,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration, cache: ResponseCache) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fantasy-hoops/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache,
            use_fresh_cache: true,
        })
    }

    /// Copy of this client that bypasses fresh cache entries (manual refresh).
    /// Responses are still cached and the offline fallback still applies.
    pub fn refreshing(&self) -> Self {
        Self {
            use_fresh_cache: false,
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /players`
    pub async fn players(&self) -> Result<Vec<RosterRecord>, ApiError> {
        self.get_json("/players").await
    }

    /// `GET /predictions/{model}`
    pub async fn predictions(&self, model: ModelType) -> Result<Vec<PredictionRecord>, ApiError> {
        self.get_json(&format!("/predictions/{}", model.slug())).await
    }

    /// `GET /models/available`
    pub async fn available_models(&self) -> Result<AvailableModels, ApiError> {
        self.get_json("/models/available").await
    }

    /// `GET /player/{id}/history`
    pub async fn player_history(&self, person_id: i64) -> Result<PlayerHistory, ApiError> {
        self.get_json(&format!("/player/{}/history", person_id)).await
    }

    /// `GET /stats/model_comparison?stat=...`
    pub async fn model_comparison(&self, category: StatCategory) -> Result<ModelComparison, ApiError> {
        self.get_json(&format!("/stats/model_comparison?stat={}", category.abbreviation()))
            .await
    }

    /// Fresh cache entry, else the network (with retry), else any cached
    /// entry as an offline fallback.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let fresh = if self.use_fresh_cache {
            self.cache.load_fresh(&url)
        } else {
            None
        };
        if let Some(entry) = fresh {
            match decode(&url, &entry.body) {
                Ok(value) => {
                    debug!(url = %url, fetched_at = %entry.fetched_at, "cache hit");
                    return Ok(value);
                }
                Err(e) => debug!(url = %url, error = %e, "ignoring unreadable cache entry"),
            }
        }

        match self.fetch_with_retry(&url).await {
            Ok(body) => {
                let value = decode(&url, &body)?;
                if let Err(e) = self.cache.store(&url, &body) {
                    warn!(url = %url, error = %e, "failed to cache response");
                }
                Ok(value)
            }
            Err(err) => {
                if let Some(entry) = self.cache.load(&url) {
                    if let Ok(value) = decode(&url, &entry.body) {
                        warn!(
                            url = %url,
                            error = %err,
                            fetched_at = %entry.fetched_at,
                            "request failed, using cached response"
                        );
                        return Ok(value);
                    }
                }
                Err(err)
            }
        }
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<String, ApiError> {
        // Retry strategy: exponential backoff with 3 attempts
        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(5))
            .take(3);

        RetryIf::start(
            retry_strategy,
            || self.fetch_once(url),
            |e: &ApiError| {
                let retry = e.is_retryable();
                if retry {
                    debug!(error = %e, "retrying request");
                }
                retry
            },
        )
        .await
    }

    async fn fetch_once(&self, url: &str) -> Result<String, ApiError> {
        debug!(url = %url, "GET");
        let response = self.http.get(url).send().await.map_err(|e| ApiError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| ApiError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::cache::CacheConfig;
    use tempfile::TempDir;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf(), CacheConfig::default());
        let client = ApiClient::new("http://localhost:8001/", Duration::from_secs(5), cache).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8001");
    }

    #[test]
    fn test_decode_error_names_url() {
        let err = decode::<Vec<RosterRecord>>("http://x/players", "{not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
        assert!(err.to_string().contains("http://x/players"));
    }
}
