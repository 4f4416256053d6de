//! Default values for every configuration section.

use crate::schema::*;
use covidtrend_common::KeyColumn;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// CSSE daily time-series directory on GitHub.
pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/";

/// Name and title written into the manifest.
pub const DEFAULT_MANIFEST_NAME: &str = "csse_covid_19_time_series";

/// Countries compared when nothing else is configured.
pub const DEFAULT_COUNTRIES: [&str; 6] = ["Morocco", "Tunisia", "Italy", "Spain", "France", "Germany"];

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            selection: SelectionConfig::default(),
            chart: ChartConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: PathBuf::from("."),
            timeout_seconds: 30,
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            manifest_title: DEFAULT_MANIFEST_NAME.to_string(),
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        // Mainland France is the row whose Province/State is "France";
        // overseas territories share "France" as their Country/Region.
        let mut key_overrides = BTreeMap::new();
        key_overrides.insert("France".to_string(), KeyColumn::Province);
        Self { key_overrides }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            countries: DEFAULT_COUNTRIES.iter().map(|c| (*c).to_string()).collect(),
            output: PathBuf::from("covidtrend.png"),
            width: 1280,
            height: 720,
            title: String::new(),
            x_label: "Date".to_string(),
            y_label: None,
            tick_every: 7,
            color_scheme: "default".to_string(),
            custom_colors: Vec::new(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}
