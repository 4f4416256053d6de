//! Configuration loading utilities

use crate::schema::Config;
use covidtrend_common::{Result as TrendResult, TrendError};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "COVIDTREND_CONFIG_PATH";

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "covidtrend.toml";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Field-level validation error
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Cross-field validation error
    #[error("Invalid value for '{field}': {message}")]
    Invalid {
        /// Dotted path of the offending field
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        /// Variable name
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for TrendError {
    fn from(err: ConfigError) -> Self {
        TrendError::config_with_source(err.to_string(), err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = toml::from_str(&content)?;
        debug!(path = %path.as_ref().display(), "parsed configuration file");

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Resolve and load the configuration.
    ///
    /// Search order: `explicit`, `$COVIDTREND_CONFIG_PATH`, `./covidtrend.toml`,
    /// then built-in defaults. Environment overrides apply in every case.
    pub fn load(explicit: Option<&Path>) -> TrendResult<Config> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .or_else(|| {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.exists().then_some(local)
            });

        let config = match path {
            Some(path) => {
                info!(path = %path.display(), "loading configuration");
                Self::load_config(&path)?
            }
            None => {
                info!("no configuration file found, using defaults");
                let mut config = Config::default();
                Self::apply_env_overrides(&mut config)?;
                config.validate_all()?;
                config
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TrendResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply `COVIDTREND_*` environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("COVIDTREND_BASE_URL") {
            config.source.base_url = url;
        }

        if let Some(dir) = lookup("COVIDTREND_DATA_DIR") {
            config.source.data_dir = PathBuf::from(dir);
        }

        if let Some(timeout) = lookup("COVIDTREND_TIMEOUT") {
            config.source.timeout_seconds =
                timeout.trim().parse().map_err(|e| ConfigError::EnvParse {
                    var: "COVIDTREND_TIMEOUT".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Some(countries) = lookup("COVIDTREND_COUNTRIES") {
            config.chart.countries = split_list(&countries);
        }

        if let Some(output) = lookup("COVIDTREND_OUTPUT") {
            config.chart.output = PathBuf::from(output);
        }

        if let Some(level) = lookup("COVIDTREND_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

/// Split a `;` separated list, dropping blanks.
///
/// CSSE names such as "Korea, South" contain commas, so commas are kept.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
