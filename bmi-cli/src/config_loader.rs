//! Persistent CLI Configuration Loader
//!
//! Loads form defaults from `~/.config/bmi/config.toml` on Linux,
//! `~/Library/Application Support/bmi/config.toml` on macOS
//! or `%APPDATA%\bmi\config.toml` on Windows.

use bmi::Gender;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// CLI Configuration structure loaded from TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliConfig {
    /// Gender preselected on the form ("male" or "female").
    pub gender: Option<Gender>,
    /// Starting height in centimeters.
    pub height: Option<Decimal>,
    /// Starting weight in kilograms.
    pub weight: Option<Decimal>,
    /// Enable file logging by default.
    pub enable_logging: Option<bool>,
}

impl CliConfig {
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bmi"))
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Loads the configuration from the default location.
    /// Returns `CliConfig::default()` if the file is missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            debug!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config file found at {:?}", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<CliConfig>(&content) {
                Ok(config) => {
                    debug!("Loaded configuration from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config file {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Writes a sample configuration file to the default location.
    pub fn create_sample() -> Result<PathBuf, std::io::Error> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "Could not determine config directory")
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let sample = CliConfig {
            gender: Some(Gender::Male),
            height: Some(Decimal::from(170)),
            weight: Some(Decimal::from(65)),
            enable_logging: Some(false),
        };
        let content = toml::to_string_pretty(&sample)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(&path, content)?;
        debug!("Saved configuration to {:?}", path);
        Ok(path)
    }
}
