use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Response caching settings
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub enabled: bool, // false when --no-cache
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: Duration::from_secs(15 * 60),
        }
    }
}

/// Get the platform-appropriate cache directory for fantasy-hoops
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("fantasy-hoops/http-cache"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/fantasy-hoops/http-cache",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

/// Clear the HTTP cache directory
pub fn clear_cache() -> Result<()> {
    let cache_path = get_cache_path();
    match std::fs::remove_dir_all(&cache_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove cache directory"),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedResponse {
    pub fetched_at: DateTime<Utc>,
    pub body: String,
}

impl CachedResponse {
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        let age = Utc::now() - self.fetched_at;
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => age < ttl,
            Err(_) => true, // ttl too large to represent
        }
    }
}

/// Disk-persistent response bodies keyed by request URL.
#[derive(Clone, Debug)]
pub struct ResponseCache {
    cache_path: PathBuf,
    config: CacheConfig,
}

impl ResponseCache {
    pub fn new(cache_path: PathBuf, config: CacheConfig) -> Self {
        Self { cache_path, config }
    }

    /// Stored response for `url`, regardless of age. `None` when caching is
    /// off or the entry is missing or unreadable.
    pub fn load(&self, url: &str) -> Option<CachedResponse> {
        if !self.config.enabled {
            return None;
        }
        let bytes = cacache::read_sync(&self.cache_path, url).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Stored response for `url` if it is younger than the TTL.
    pub fn load_fresh(&self, url: &str) -> Option<CachedResponse> {
        self.load(url).filter(|entry| entry.is_fresh(self.config.ttl))
    }

    pub fn store(&self, url: &str, body: &str) -> Result<()> {
        if !self.config.enabled {
            return Ok(());
        }
        let entry = CachedResponse {
            fetched_at: Utc::now(),
            body: body.to_string(),
        };
        let json = serde_json::to_vec(&entry)?;
        cacache::write_sync(&self.cache_path, url, &json).context("Failed to write response cache")?;
        Ok(())
    }
}
