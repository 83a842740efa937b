//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::TiePolicy;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Statistics evaluation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsConfig {
    /// How tied top scores are credited in "Games won"
    #[serde(default)]
    pub tie_policy: TiePolicy,
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Persist the rendered grid after every evaluation
    #[serde(default = "default_write_file")]
    pub write_file: bool,

    /// File name of the persisted report, inside the data directory
    #[serde(default = "default_stats_file")]
    pub stats_file: String,
}

fn default_write_file() -> bool {
    true
}

fn default_stats_file() -> String {
    "stats.txt".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            write_file: default_write_file(),
            stats_file: default_stats_file(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub stats: StatsConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            stats: StatsConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.stats_file.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Report stats_file must not be empty".to_string(),
            ));
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "data_dir must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
