//! Graph types and data structures

use covidtrend_common::Case;
use covidtrend_config::ChartConfig;
use covidtrend_data::CountrySeries;
use serde::{Deserialize, Serialize};

/// Graph configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Label every n-th x position; the last one is always labelled.
    pub tick_every: usize,
    pub style: StyleConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::from_chart(&ChartConfig::default(), Case::Confirmed)
    }
}

impl GraphConfig {
    /// Graph configuration for a chart of `case`.
    pub fn from_chart(chart: &ChartConfig, case: Case) -> Self {
        Self {
            title: chart.title.clone(),
            width: chart.width,
            height: chart.height,
            x_label: Some(chart.x_label.clone()).filter(|l| !l.is_empty()),
            y_label: Some(chart.y_label_for(case)),
            tick_every: chart.tick_every.max(1) as usize,
            style: StyleConfig {
                color_scheme: ColorScheme::from_chart(chart),
                ..StyleConfig::default()
            },
        }
    }
}

/// Data point for graphs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Position along the x axis
    pub x: usize,
    /// Cumulative count
    pub y: i64,
    /// `D/M` label of the date
    pub label: String,
}

/// Graph data set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    pub name: String,
    pub data: Vec<DataPoint>,
    pub color: Option<String>,
}

impl From<CountrySeries> for DataSet {
    fn from(series: CountrySeries) -> Self {
        let data = series
            .dates
            .iter()
            .zip(&series.counts)
            .enumerate()
            .map(|(x, (date, count))| DataPoint {
                x,
                y: *count,
                label: date.label(),
            })
            .collect();

        Self {
            name: series.country,
            data,
            color: None,
        }
    }
}

impl DataSet {
    /// Points that can be drawn on a log axis.
    pub fn positive_points(&self) -> impl Iterator<Item = &DataPoint> {
        self.data.iter().filter(|p| p.y > 0)
    }
}

/// Color scheme for graphs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColorScheme {
    Default,
    Dark,
    Vibrant,
    Monochrome,
    Custom(Vec<String>),
}

impl ColorScheme {
    /// Scheme selected by chart configuration. Custom colors win over the name.
    pub fn from_chart(chart: &ChartConfig) -> Self {
        if !chart.custom_colors.is_empty() {
            return Self::Custom(chart.custom_colors.clone());
        }
        match chart.color_scheme.to_ascii_lowercase().as_str() {
            "dark" => Self::Dark,
            "vibrant" => Self::Vibrant,
            "monochrome" => Self::Monochrome,
            _ => Self::Default,
        }
    }
}

/// Font configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 14,
        }
    }
}

/// Margin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginConfig {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 20,
            bottom: 50,
            left: 80,
        }
    }
}

/// Comprehensive styling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub color_scheme: ColorScheme,
    pub background_color: Option<String>,
    pub title_font: FontConfig,
    pub axis_font: FontConfig,
    pub margins: MarginConfig,
    pub line_width: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Default,
            background_color: Some("#FFFFFF".to_string()),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 24,
            },
            axis_font: FontConfig::default(),
            margins: MarginConfig::default(),
            line_width: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covidtrend_data::ReportDate;

    #[test]
    fn test_default_graph_config_matches_chart_defaults() {
        let config = GraphConfig::default();
        assert_eq!(config.x_label.as_deref(), Some("Date"));
        assert_eq!(config.y_label.as_deref(), Some("Confirmed cases"));
        assert_eq!(config.tick_every, 7);
        assert_eq!((config.width, config.height), (1280, 720));
    }

    #[test]
    fn test_color_scheme_from_chart() {
        let mut chart = ChartConfig::default();
        assert_eq!(ColorScheme::from_chart(&chart), ColorScheme::Default);

        chart.color_scheme = "Dark".to_string();
        assert_eq!(ColorScheme::from_chart(&chart), ColorScheme::Dark);

        chart.custom_colors = vec!["#112233".to_string()];
        assert_eq!(
            ColorScheme::from_chart(&chart),
            ColorScheme::Custom(vec!["#112233".to_string()])
        );
    }

    #[test]
    fn test_dataset_from_series() {
        let series = CountrySeries {
            country: "Italy".to_string(),
            dates: vec![
                ReportDate::parse("1/22/20").unwrap(),
                ReportDate::parse("1/23/20").unwrap(),
            ],
            counts: vec![0, 7],
        };

        let dataset = DataSet::from(series);

        assert_eq!(dataset.name, "Italy");
        assert_eq!(dataset.data[1], DataPoint { x: 1, y: 7, label: "23/1".to_string() });
        assert_eq!(dataset.positive_points().count(), 1);
    }
}
