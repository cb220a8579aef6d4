//! User settings stored in the data directory
//!
//! Directory structure:
//! ~/.sweepgen/
//!   config.yaml          # Settings below
//!   sweepgen.log         # Rotated log file
//!   custom-config-files/ # Default generation output
//!   results/             # Saved report documents

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sweepgen_core::model::MIN_STEP;
use thiserror::Error;

use crate::util::atomic_write;

const SETTINGS_FILE_NAME: &str = "config.yaml";
const DEFAULT_OUTPUT_DIR: &str = "custom-config-files";
const DEFAULT_RESULTS_DIR: &str = "results";

fn default_step() -> f64 {
    MIN_STEP
}

/// Settings stored in config.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Root of generated sweep trees (default: `<data_dir>/custom-config-files`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Where saved report documents go (default: `<data_dir>/results`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_dir: Option<PathBuf>,
    /// Step used when a `--sweep` omits one
    #[serde(default = "default_step")]
    pub default_step: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: None,
            results_dir: None,
            default_step: default_step(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("failed to serialize settings: {0}")]
    Serialize(String),
}

impl Settings {
    /// Get the default data directory path (~/.sweepgen/)
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sweepgen")
    }

    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(SETTINGS_FILE_NAME)
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load(data_dir: &Path) -> Result<Self, SettingsError> {
        let path = Self::path(data_dir);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| SettingsError::Io {
            path: path.clone(),
            source,
        })?;

        serde_saphyr::from_str(&content).map_err(|e| SettingsError::Parse {
            path,
            message: e.to_string(),
        })
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), SettingsError> {
        fs::create_dir_all(data_dir).map_err(|source| SettingsError::Io {
            path: data_dir.to_path_buf(),
            source,
        })?;

        let yaml =
            serde_saphyr::to_string(self).map_err(|e| SettingsError::Serialize(e.to_string()))?;

        let path = Self::path(data_dir);
        atomic_write(&path, &yaml).map_err(|source| SettingsError::Io { path, source })
    }

    /// Load settings, writing the defaults out on first run
    pub fn load_or_init(data_dir: &Path) -> Result<Self, SettingsError> {
        if Self::path(data_dir).exists() {
            return Self::load(data_dir);
        }

        let settings = Self::default();
        settings.save(data_dir)?;
        tracing::info!(data_dir = %data_dir.display(), "created default settings");
        Ok(settings)
    }

    pub fn output_dir(&self, data_dir: &Path) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| data_dir.join(DEFAULT_OUTPUT_DIR))
    }

    pub fn results_dir(&self, data_dir: &Path) -> PathBuf {
        self.results_dir
            .clone()
            .unwrap_or_else(|| data_dir.join(DEFAULT_RESULTS_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load(temp_dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.default_step, MIN_STEP);
    }

    #[test]
    fn test_load_or_init_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join(".sweepgen");

        let settings = Settings::load_or_init(&data_dir).unwrap();
        assert!(Settings::path(&data_dir).exists());
        assert_eq!(Settings::load(&data_dir).unwrap(), settings);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings {
            output_dir: Some(PathBuf::from("/srv/sniper/config")),
            results_dir: None,
            default_step: 0.5,
        };

        settings.save(temp_dir.path()).unwrap();
        assert_eq!(Settings::load(temp_dir.path()).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(Settings::path(temp_dir.path()), "output_dir: /tmp/sweeps\n").unwrap();

        let settings = Settings::load(temp_dir.path()).unwrap();
        assert_eq!(settings.output_dir, Some(PathBuf::from("/tmp/sweeps")));
        assert_eq!(settings.default_step, MIN_STEP);
        assert_eq!(
            settings.results_dir(temp_dir.path()),
            temp_dir.path().join("results")
        );
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(Settings::path(temp_dir.path()), "default_step: [not a number\n").unwrap();

        let err = Settings::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains("config.yaml"));
    }

    #[test]
    fn test_default_directories() {
        let settings = Settings::default();
        let data_dir = Path::new("/home/user/.sweepgen");
        assert_eq!(
            settings.output_dir(data_dir),
            data_dir.join("custom-config-files")
        );
    }
}
