//! Configuration
//!
//! Optional JSON file:
//!
//! ```json
//! { "catalog_path": "library.txt", "log_level": "warn" }
//! ```
//!
//! Every field has a default. `--file` and `--log-level` override the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::catalog::DEFAULT_CATALOG_FILE;
use crate::observability::{Severity, DEFAULT_MIN_SEVERITY};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backing file for the catalog (default "library.txt")
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Minimum log severity (default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG_FILE)
}
fn default_log_level() -> String {
    DEFAULT_MIN_SEVERITY.as_str().to_lowercase()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Builds the effective configuration from an optional file plus
    /// command-line overrides.
    pub fn resolve(
        config_path: Option<&Path>,
        file_override: Option<PathBuf>,
        log_level_override: Option<&str>,
    ) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(file) = file_override {
            config.catalog_path = file;
        }
        if let Some(level) = log_level_override {
            config.log_level = level.to_string();
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err(CliError::config_error("catalog_path must not be empty"));
        }

        self.min_severity()?;

        Ok(())
    }

    /// Parsed `log_level`
    pub fn min_severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse::<Severity>()
            .map_err(|e| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    /// Get catalog file as Path
    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }
}
