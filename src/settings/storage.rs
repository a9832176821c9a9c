use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::scoring::{validate_weights, ScoringWeights, StatCategory};

/// Saved weights live next to config.yaml under this name.
pub const WEIGHTS_FILE_NAME: &str = "customScoringWeights.json";

/// Get the default weights file path (~/.config/fantasy-hoops/customScoringWeights.json)
pub fn get_weights_path() -> PathBuf {
    crate::config::get_config_dir().join(WEIGHTS_FILE_NAME)
}

/// Weights file that belongs with `config_path`: same directory, or the
/// default location when no config file was named.
pub fn weights_path_for(config_path: Option<&Path>) -> PathBuf {
    match config_path {
        Some(path) => path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(WEIGHTS_FILE_NAME),
        None => get_weights_path(),
    }
}

/// Overlay the stored values on `base`. Missing, null or non-numeric keys
/// keep the base value, so older or hand-edited files still load.
fn merge_onto(stored: &Map<String, Value>, base: &ScoringWeights) -> ScoringWeights {
    let mut merged = *base;
    for category in StatCategory::ALL {
        if let Some(value) = stored
            .get(category.key())
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
        {
            merged.set(category, value);
        }
    }
    merged
}

/// Load saved weights, back-filling missing categories from `base`.
///
/// A missing file yields `base`. An unreadable or corrupt file is logged and
/// ignored, also yielding `base`.
pub fn load_weights(path: &Path, base: &ScoringWeights) -> ScoringWeights {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no saved weights");
            return *base;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read saved weights, using defaults");
            return *base;
        }
    };

    match serde_json::from_str::<Map<String, Value>>(&content) {
        Ok(stored) => merge_onto(&stored, base),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "saved weights are corrupt, using defaults");
            *base
        }
    }
}

/// Save weights to a JSON file atomically
///
/// Rejects non-finite weights. Creates the parent directory if needed.
pub fn save_weights(path: &Path, weights: &ScoringWeights) -> Result<()> {
    if let Err(errors) = validate_weights(weights) {
        anyhow::bail!("Refusing to save invalid weights:\n  {}", errors.join("\n  "));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, weights).context("Failed to serialize scoring weights")?;

    file.commit().context("Failed to save scoring weights")?;

    Ok(())
}

/// Forget saved weights. A missing file is not an error.
pub fn reset_weights(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::WeightPreset;
    use tempfile::TempDir;

    #[test]
    fn test_weights_path_follows_config_dir() {
        let path = weights_path_for(Some(Path::new("/tmp/league/config.yaml")));
        assert_eq!(path, PathBuf::from("/tmp/league").join(WEIGHTS_FILE_NAME));
        assert_eq!(weights_path_for(Some(Path::new("config.yaml"))), PathBuf::from(WEIGHTS_FILE_NAME));
        assert_eq!(weights_path_for(None), get_weights_path());
    }

    #[test]
    fn test_load_missing_file_returns_base() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(WEIGHTS_FILE_NAME);
        let base = WeightPreset::Equal.weights();
        assert_eq!(load_weights(&path, &base), base);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(WEIGHTS_FILE_NAME);
        let weights = ScoringWeights::default()
            .with(StatCategory::ThreePointsMade, 0.5)
            .with(StatCategory::Turnovers, -2.0);

        save_weights(&path, &weights).unwrap();
        let loaded = load_weights(&path, &ScoringWeights::zero());
        assert_eq!(loaded, weights);
    }

    #[test]
    fn test_partial_file_backfilled_from_base() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(WEIGHTS_FILE_NAME);
        fs::write(&path, r#"{"points": 2.0, "blocks": null}"#).unwrap();

        let base = ScoringWeights::default();
        let loaded = load_weights(&path, &base);
        assert_eq!(loaded.points, 2.0);
        assert_eq!(loaded.blocks, base.blocks);
        assert_eq!(loaded.rebounds, base.rebounds);
    }

    #[test]
    fn test_non_numeric_and_unknown_keys_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(WEIGHTS_FILE_NAME);
        fs::write(
            &path,
            r#"{"threePointsMade": 0.75, "steals": "lots", "dunks": 9.0, "freeThrowsMade": 1}"#,
        )
        .unwrap();

        let base = ScoringWeights::default();
        let loaded = load_weights(&path, &base);
        assert_eq!(loaded.three_points_made, 0.75);
        assert_eq!(loaded.free_throws_made, 1.0);
        assert_eq!(loaded.steals, base.steals);
    }

    #[test]
    fn test_non_object_file_yields_base() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(WEIGHTS_FILE_NAME);
        fs::write(&path, "[1.0, 2.0]").unwrap();

        let base = WeightPreset::Equal.weights();
        assert_eq!(load_weights(&path, &base), base);
    }

    #[test]
    fn test_corrupt_file_yields_base() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(WEIGHTS_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        let base = WeightPreset::Legacy.weights();
        assert_eq!(load_weights(&path, &base), base);
    }

    #[test]
    fn test_saved_keys_are_camel_case() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(WEIGHTS_FILE_NAME);
        save_weights(&path, &ScoringWeights::default()).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"fieldGoalsMade\""));
        assert!(raw.contains("\"personalFouls\""));
    }

    #[test]
    fn test_save_rejects_non_finite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(WEIGHTS_FILE_NAME);
        let weights = ScoringWeights::default().with(StatCategory::Points, f64::NAN);
        assert!(save_weights(&path, &weights).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_reset_removes_file_and_tolerates_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(WEIGHTS_FILE_NAME);
        save_weights(&path, &ScoringWeights::default()).unwrap();

        reset_weights(&path).unwrap();
        assert!(!path.exists());
        reset_weights(&path).unwrap();
    }
}
