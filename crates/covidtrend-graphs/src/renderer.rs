//! Graph rendering trait and the log-scale line chart implementation

use crate::{ColorScheme, DataSet, GraphConfig, StyleConfig};
use covidtrend_common::{Result, TrendError};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Trait for rendering graphs with different styling options
#[async_trait::async_trait]
pub trait GraphRenderer {
    /// Render a graph to a file path
    async fn render_to_file(
        &self,
        config: &GraphConfig,
        datasets: &[DataSet],
        path: &Path,
    ) -> Result<()>;

    /// Get the default style configuration for this renderer
    fn default_style(&self) -> StyleConfig {
        StyleConfig::default()
    }

    /// Get colors from color scheme
    fn get_colors(&self, scheme: &ColorScheme) -> Vec<RGBColor> {
        match scheme {
            ColorScheme::Default => vec![
                RGBColor(31, 119, 180),   // Blue
                RGBColor(255, 127, 14),   // Orange
                RGBColor(44, 160, 44),    // Green
                RGBColor(214, 39, 40),    // Red
                RGBColor(148, 103, 189),  // Purple
                RGBColor(140, 86, 75),    // Brown
                RGBColor(227, 119, 194),  // Pink
                RGBColor(127, 127, 127),  // Gray
            ],
            ColorScheme::Dark => vec![
                RGBColor(55, 126, 184),
                RGBColor(228, 26, 28),
                RGBColor(77, 175, 74),
                RGBColor(255, 127, 0),
                RGBColor(152, 78, 163),
                RGBColor(166, 86, 40),
            ],
            ColorScheme::Vibrant => vec![
                RGBColor(230, 25, 75),
                RGBColor(60, 180, 75),
                RGBColor(255, 225, 25),
                RGBColor(0, 130, 200),
                RGBColor(245, 130, 48),
                RGBColor(145, 30, 180),
                RGBColor(70, 240, 240),
                RGBColor(240, 50, 230),
            ],
            ColorScheme::Monochrome => vec![
                RGBColor(0, 0, 0),
                RGBColor(64, 64, 64),
                RGBColor(112, 112, 112),
                RGBColor(160, 160, 160),
                RGBColor(200, 200, 200),
            ],
            ColorScheme::Custom(colors) => {
                colors.iter().map(|color| self.parse_color(color)).collect()
            }
        }
    }

    /// Parse a `#RRGGBB` color, falling back to black
    fn parse_color(&self, color_str: &str) -> RGBColor {
        if let Some(hex) = color_str.strip_prefix('#') {
            if hex.len() == 6 && hex.is_ascii() {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        RGBColor(0, 0, 0)
    }

    /// Get background color from style config
    fn get_background_color(&self, config: &GraphConfig) -> RGBColor {
        config
            .style
            .background_color
            .as_ref()
            .map(|color| self.parse_color(color))
            .unwrap_or(WHITE)
    }
}

/// X positions that get a date label: every `every`-th one plus the last.
pub fn tick_indices(len: usize, every: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let mut ticks: Vec<usize> = (0..len).step_by(every.max(1)).collect();
    if ticks.last() != Some(&(len - 1)) {
        ticks.push(len - 1);
    }
    ticks
}

/// Line chart with a logarithmic y axis, one line per dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineChartRenderer;

impl LineChartRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Upper bound of the log axis.
    fn y_upper_bound(datasets: &[DataSet]) -> f64 {
        let max = datasets
            .iter()
            .flat_map(DataSet::positive_points)
            .map(|p| p.y)
            .max()
            .unwrap_or(1);
        (max as f64 * 1.5).max(10.0)
    }

    /// Date labels of the longest dataset.
    fn x_labels(datasets: &[DataSet]) -> Vec<String> {
        datasets
            .iter()
            .max_by_key(|d| d.data.len())
            .map(|d| d.data.iter().map(|p| p.label.clone()).collect())
            .unwrap_or_default()
    }

    fn draw<DB>(
        &self,
        root: DrawingArea<DB, Shift>,
        config: &GraphConfig,
        datasets: &[DataSet],
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&self.get_background_color(config))?;

        let style = &config.style;
        let labels = Self::x_labels(datasets);
        let ticks = tick_indices(labels.len(), config.tick_every);
        let x_max = labels.len().saturating_sub(1).max(1);
        let y_max = Self::y_upper_bound(datasets);
        debug!(points = labels.len(), ticks = ticks.len(), y_max, "chart bounds");

        let mut builder = ChartBuilder::on(&root);
        builder
            .margin(style.margins.top as i32)
            .margin_right(style.margins.right as i32)
            .x_label_area_size(style.margins.bottom as i32)
            .y_label_area_size(style.margins.left as i32);
        if !config.title.is_empty() {
            builder.caption(
                &config.title,
                (style.title_font.family.as_str(), style.title_font.size),
            );
        }
        // Only the tick indices become x key points, so no other date gets a
        // tick mark, grid line or label.
        let x_range = (0usize..x_max).with_key_points(ticks);
        let mut chart = builder.build_cartesian_2d(x_range, (1f64..y_max).log_scale())?;

        let axis_font = (style.axis_font.family.as_str(), style.axis_font.size);
        let label_at = |x: &usize| labels.get(*x).cloned().unwrap_or_default();
        let count_label = |y: &f64| format!("{y:.0}");
        chart
            .configure_mesh()
            .x_desc(config.x_label.as_deref().unwrap_or(""))
            .y_desc(config.y_label.as_deref().unwrap_or(""))
            .x_label_formatter(&label_at)
            .y_label_formatter(&count_label)
            .label_style(axis_font)
            .axis_desc_style(axis_font)
            .draw()?;

        let colors = self.get_colors(&style.color_scheme);
        let width = style.line_width;
        for (i, dataset) in datasets.iter().enumerate() {
            let color = dataset
                .color
                .as_deref()
                .map(|c| self.parse_color(c))
                .or_else(|| colors.get(i % colors.len().max(1)).copied())
                .unwrap_or(BLACK);

            let points = dataset.positive_points().map(|p| (p.x, p.y as f64));
            chart
                .draw_series(LineSeries::new(points, color.stroke_width(width)))?
                .label(dataset.name.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width))
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font(axis_font)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }

    /// Draw synchronously; the format follows the file extension.
    pub fn render_sync(&self, config: &GraphConfig, datasets: &[DataSet], path: &Path) -> Result<()> {
        if datasets.is_empty() {
            return Err(TrendError::graph("no series to plot"));
        }

        let size = (config.width, config.height);
        let is_svg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

        if is_svg {
            self.draw(SVGBackend::new(path, size).into_drawing_area(), config, datasets)?;
        } else {
            self.draw(BitMapBackend::new(path, size).into_drawing_area(), config, datasets)?;
        }

        info!(
            path = %path.display(),
            series = datasets.len(),
            format = if is_svg { "svg" } else { "bitmap" },
            "rendered chart"
        );
        Ok(())
    }
}

#[async_trait::async_trait]
impl GraphRenderer for LineChartRenderer {
    async fn render_to_file(
        &self,
        config: &GraphConfig,
        datasets: &[DataSet],
        path: &Path,
    ) -> Result<()> {
        self.render_sync(config, datasets, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataPoint;
    use covidtrend_common::test_utils::{fonts_available, svg_texts};

    struct MockRenderer;

    #[async_trait::async_trait]
    impl GraphRenderer for MockRenderer {
        async fn render_to_file(
            &self,
            _config: &GraphConfig,
            _datasets: &[DataSet],
            _path: &Path,
        ) -> Result<()> {
            Ok(())
        }
    }

    fn dataset(name: &str, values: &[i64]) -> DataSet {
        DataSet {
            name: name.to_string(),
            data: values
                .iter()
                .enumerate()
                .map(|(x, y)| DataPoint {
                    x,
                    y: *y,
                    label: format!("{}/1", 22 + x),
                })
                .collect(),
            color: None,
        }
    }

    #[test]
    fn test_tick_indices() {
        assert_eq!(tick_indices(20, 7), vec![0, 7, 14, 19]);
        assert_eq!(tick_indices(15, 7), vec![0, 7, 14]);
        assert_eq!(tick_indices(1, 7), vec![0]);
        assert_eq!(tick_indices(3, 1), vec![0, 1, 2]);
        assert_eq!(tick_indices(3, 0), vec![0, 1, 2]);
        assert!(tick_indices(0, 7).is_empty());
    }

    #[test]
    fn test_tick_indices_have_no_duplicates() {
        for len in 1..60 {
            for every in 1..10 {
                let ticks = tick_indices(len, every);
                let mut deduped = ticks.clone();
                deduped.dedup();
                assert_eq!(ticks, deduped);
                assert_eq!(ticks.last(), Some(&(len - 1)));
            }
        }
    }

    #[test]
    fn test_color_schemes() {
        let renderer = MockRenderer;

        let default_colors = renderer.get_colors(&ColorScheme::Default);
        assert_eq!(default_colors[0], RGBColor(31, 119, 180));
        assert!(!renderer.get_colors(&ColorScheme::Monochrome).is_empty());

        let custom = ColorScheme::Custom(vec!["#FF0000".to_string(), "#00ff00".to_string()]);
        assert_eq!(
            renderer.get_colors(&custom),
            vec![RGBColor(255, 0, 0), RGBColor(0, 255, 0)]
        );
    }

    #[test]
    fn test_color_parsing() {
        let renderer = MockRenderer;
        assert_eq!(renderer.parse_color("#0000FF"), RGBColor(0, 0, 255));
        assert_eq!(renderer.parse_color("invalid"), RGBColor(0, 0, 0));
        assert_eq!(renderer.parse_color("#ZZ0000"), RGBColor(0, 0, 0));
        assert_eq!(renderer.parse_color("#ééé"), RGBColor(0, 0, 0));
    }

    #[test]
    fn test_background_color() {
        let renderer = MockRenderer;
        let mut config = GraphConfig::default();
        assert_eq!(renderer.get_background_color(&config), RGBColor(255, 255, 255));

        config.style.background_color = Some("#101010".to_string());
        assert_eq!(renderer.get_background_color(&config), RGBColor(16, 16, 16));
    }

    #[test]
    fn test_y_upper_bound_ignores_non_positive() {
        assert_eq!(LineChartRenderer::y_upper_bound(&[dataset("A", &[0, 0])]), 10.0);
        assert_eq!(LineChartRenderer::y_upper_bound(&[dataset("A", &[0, 100]), dataset("B", &[-5])]), 150.0);
    }

    #[test]
    fn test_x_labels_from_longest_dataset() {
        let labels = LineChartRenderer::x_labels(&[dataset("A", &[1]), dataset("B", &[1, 2, 3])]);
        assert_eq!(labels, vec!["22/1", "23/1", "24/1"]);
    }

    #[test]
    fn test_render_rejects_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = LineChartRenderer::new()
            .render_sync(&GraphConfig::default(), &[], &dir.path().join("out.svg"))
            .unwrap_err();
        assert!(err.to_string().contains("no series"));
    }

    #[tokio::test]
    async fn test_render_svg_axes() {
        if !fonts_available() {
            eprintln!("no usable system font, skipping chart rendering");
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let values: Vec<i64> = (0..20).map(|x| 10 * x + 1).collect();
        let datasets = vec![dataset("Italy", &values), dataset("Spain", &[0, 0, 2, 9])];
        let config = GraphConfig::default();

        LineChartRenderer::new()
            .render_to_file(&config, &datasets, &path)
            .await
            .unwrap();

        let texts = svg_texts(&std::fs::read_to_string(&path).unwrap());
        let has = |label: &str| texts.iter().any(|t| t == label);

        let ticks = tick_indices(values.len(), config.tick_every);
        assert_eq!(ticks, vec![0, 7, 14, 19]);
        for x in 0..values.len() {
            let label = format!("{}/1", 22 + x);
            assert_eq!(has(&label), ticks.contains(&x), "x label {label}");
        }

        assert!(has("Date"));
        assert!(has("Confirmed cases"));
        assert!(has("Italy"));
        assert!(has("Spain"));

        let mut y_labels: Vec<f64> = texts.iter().filter_map(|t| t.parse().ok()).collect();
        y_labels.sort_by(f64::total_cmp);
        y_labels.dedup();
        assert_eq!(y_labels, vec![1.0, 10.0, 100.0]);
    }

    #[tokio::test]
    async fn test_render_png() {
        if !fonts_available() {
            eprintln!("no usable system font, skipping chart rendering");
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");

        LineChartRenderer::new()
            .render_to_file(&GraphConfig::default(), &[dataset("Italy", &[1, 2, 3])], &path)
            .await
            .unwrap();

        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
