pub mod init;
mod schema;

pub use schema::{
    validate_config, Config, DEFAULT_API_BASE_URL, DEFAULT_CACHE_TTL, DEFAULT_REQUEST_TIMEOUT_SECS, PAGE_SIZES,
};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the config directory path (~/.config/fantasy-hoops/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("fantasy-hoops")
}

/// Get the default config file path (~/.config/fantasy-hoops/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/fantasy-hoops/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
/// - Any field fails validation
///
/// A missing file at the default path is not an error; defaults are used.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let config = read_config(&config_path)?;

    if let Err(errors) = validate_config(&config) {
        anyhow::bail!(
            "Invalid config in {}:\n  {}",
            config_path.display(),
            errors.join("\n  ")
        );
    }

    Ok(config)
}

fn read_config(config_path: &Path) -> Result<Config> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_explicit_path_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.yaml");
        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "page_size: 50\ndefault_preset: equal\n").unwrap();

        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.page_size, 50);
        assert_eq!(config.default_preset, crate::scoring::WeightPreset::Equal);
    }

    #[test]
    fn test_invalid_values_reported_together() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "page_size: 0\ncache_ttl: later\n").unwrap();

        let err = load_config(Some(path)).unwrap_err().to_string();
        assert!(err.contains("page_size"));
        assert!(err.contains("cache_ttl"));
    }

    #[test]
    fn test_malformed_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "page_size: [unclosed").unwrap();
        assert!(load_config(Some(path)).is_err());
    }
}
