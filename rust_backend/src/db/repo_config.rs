//! Engine configuration file support.
//!
//! This module reads repository selection and booking limits from a TOML
//! file:
//!
//! ```toml
//! [repository]
//! type = "file"
//!
//! [file]
//! config_path = "schedule_config.json"
//!
//! [booking]
//! horizon_days = 30
//! max_listed_dates = 14
//! max_occurrences = 52
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::RepositoryError;

/// Engine settings from file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub file: FileSettings,
    #[serde(default)]
    pub booking: BookingSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
}

/// File store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default = "default_config_path")]
    pub config_path: PathBuf,
}

/// Limits applied by the availability and series booking services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSettings {
    /// Days scanned, starting today, when listing bookable dates.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    /// Maximum number of bookable dates listed.
    #[serde(default = "default_max_listed_dates")]
    pub max_listed_dates: usize,
    /// Upper bound on `occurrenceCount` of a recurring request.
    #[serde(default = "default_max_occurrences")]
    pub max_occurrences: u32,
}

fn default_repo_type() -> String {
    "local".to_string()
}

fn default_config_path() -> PathBuf {
    PathBuf::from("schedule_config.json")
}

fn default_horizon_days() -> u32 {
    30
}

fn default_max_listed_dates() -> usize {
    14
}

fn default_max_occurrences() -> u32 {
    52
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
        }
    }
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            config_path: default_config_path(),
        }
    }
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            max_listed_dates: default_max_listed_dates(),
            max_occurrences: default_max_occurrences(),
        }
    }
}

impl EngineSettings {
    /// Load settings from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(EngineSettings)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::ConfigurationError(format!("Failed to read config file: {}", e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load settings from the default location.
    ///
    /// Searches for `booking.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(EngineSettings)` if found and parsed successfully
    /// * `Err(RepositoryError)` if no config file found or parse error
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = [
            PathBuf::from("booking.toml"),
            PathBuf::from("rust_backend/booking.toml"),
            PathBuf::from("../booking.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::ConfigurationError(
            "No booking.toml found in standard locations".to_string(),
        ))
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, RepositoryError> {
        self.repository
            .repo_type
            .parse()
            .map_err(RepositoryError::ConfigurationError)
    }
}

impl FromStr for EngineSettings {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_toml_str(s)
    }
}
