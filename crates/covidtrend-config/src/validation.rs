//! Cross-field validation on top of the `validator` derive rules.

use crate::loader::ConfigError;
use crate::schema::Config;
use url::Url;
use validator::Validate;

/// Palettes understood by the renderer.
pub const KNOWN_COLOR_SCHEMES: [&str; 4] = ["default", "dark", "vibrant", "monochrome"];

/// Check that a string is a `#RRGGBB` color.
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .map(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        message: message.into(),
    }
}

impl Config {
    /// Validate every section, then the rules the derive cannot express.
    pub fn validate_all(&self) -> Result<(), ConfigError> {
        self.source.validate()?;
        self.chart.validate()?;

        let base = Url::parse(&self.source.base_url)
            .map_err(|e| invalid("source.base_url", e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid("source.base_url", "scheme must be http or https"));
        }
        if !self.source.base_url.ends_with('/') {
            return Err(invalid("source.base_url", "must end with '/'"));
        }

        if let Some(blank) = self.chart.countries.iter().find(|c| c.trim().is_empty()) {
            return Err(invalid(
                "chart.countries",
                format!("country names cannot be blank (got {blank:?})"),
            ));
        }

        if self.chart.custom_colors.is_empty() {
            if !KNOWN_COLOR_SCHEMES.contains(&self.chart.color_scheme.as_str()) {
                return Err(invalid(
                    "chart.color_scheme",
                    format!(
                        "unknown scheme '{}', expected one of {}",
                        self.chart.color_scheme,
                        KNOWN_COLOR_SCHEMES.join(", ")
                    ),
                ));
            }
        } else if let Some(bad) = self.chart.custom_colors.iter().find(|c| !is_hex_color(c)) {
            return Err(invalid(
                "chart.custom_colors",
                format!("'{bad}' is not a #RRGGBB color"),
            ));
        }

        Ok(())
    }
}
