//! Configuration schema definitions using serde with validation attributes.

use covidtrend_common::{KeyColumn, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use validator::Validate;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote source and local file layout.
    pub source: SourceConfig,
    /// Country row selection.
    pub selection: SelectionConfig,
    /// Chart rendering.
    pub chart: ChartConfig,
    /// Logging output.
    pub logging: LoggingSettings,
}

/// Where the time series come from and where they are cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL the three CSV file names are appended to.
    #[validate(url(message = "Base URL must be a valid URL"))]
    pub base_url: String,

    /// Directory holding the downloaded files and the manifest.
    pub data_dir: PathBuf,

    /// HTTP request timeout in seconds.
    #[validate(range(min = 1, max = 600, message = "Timeout must be between 1 and 600 seconds"))]
    pub timeout_seconds: u64,

    /// `name` written into the manifest.
    #[validate(length(min = 1, message = "Manifest name cannot be empty"))]
    pub manifest_name: String,

    /// `title` written into the manifest.
    pub manifest_title: String,
}

/// Countries mapped to the identifying column they are matched on.
pub type KeyOverrides = BTreeMap<String, KeyColumn>;

/// Country row selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Countries matched on a column other than `Country/Region`.
    pub key_overrides: KeyOverrides,
}

/// Chart rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartConfig {
    /// Countries to compare, in legend order.
    #[validate(length(min = 1, message = "At least one country is required"))]
    pub countries: Vec<String>,

    /// Output image path; `.svg` selects the SVG backend.
    pub output: PathBuf,

    /// Chart width in pixels.
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000 pixels"))]
    pub width: u32,

    /// Chart height in pixels.
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000 pixels"))]
    pub height: u32,

    /// Chart caption. Empty means no caption.
    pub title: String,

    /// X axis description.
    pub x_label: String,

    /// Y axis description. Falls back to the case's own label when unset.
    pub y_label: Option<String>,

    /// Label every n-th date on the x axis (the last date is always labelled).
    #[validate(range(min = 1, max = 366, message = "Tick interval must be between 1 and 366"))]
    pub tick_every: u32,

    /// Named palette: default, dark, vibrant or monochrome.
    pub color_scheme: String,

    /// Explicit `#RRGGBB` palette; overrides `color_scheme` when non-empty.
    pub custom_colors: Vec<String>,
}

/// Logging configuration as it appears in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error or a directive list)
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
    /// Optional log file path
    pub file: Option<String>,
}

impl From<&LoggingSettings> for LoggingConfig {
    fn from(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level.clone(),
            json_format: settings.json,
            file_path: settings.file.clone(),
            ..LoggingConfig::default()
        }
    }
}

impl ChartConfig {
    /// Y axis label for a chart of `case`.
    pub fn y_label_for(&self, case: covidtrend_common::Case) -> String {
        self.y_label
            .clone()
            .unwrap_or_else(|| case.axis_label().to_string())
    }
}

impl SelectionConfig {
    /// Key column used to match `country`.
    pub fn key_for(&self, country: &str) -> KeyColumn {
        self.key_overrides
            .get(country)
            .copied()
            .unwrap_or_default()
    }
}
