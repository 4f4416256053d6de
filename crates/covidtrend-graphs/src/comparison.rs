//! Overlaying several countries' series on one chart

use crate::{DataSet, GraphConfig, GraphRenderer, LineChartRenderer};
use covidtrend_common::Result;
use covidtrend_data::{Selector, TimeSeriesTable};
use std::path::Path;
use tracing::{info, instrument};

/// Selects each country's series from a table and hands them to a renderer.
pub struct CountryComparison<R = LineChartRenderer> {
    selector: Selector,
    renderer: R,
}

impl CountryComparison<LineChartRenderer> {
    /// Comparison drawn with the log-scale line renderer.
    pub fn new(selector: Selector) -> Self {
        Self::with_renderer(selector, LineChartRenderer::new())
    }
}

impl Default for CountryComparison<LineChartRenderer> {
    fn default() -> Self {
        Self::new(Selector::default())
    }
}

impl<R: GraphRenderer + Sync> CountryComparison<R> {
    pub fn with_renderer(selector: Selector, renderer: R) -> Self {
        Self { selector, renderer }
    }

    /// One dataset per country, in the given order.
    ///
    /// Fails on the first country that cannot be selected.
    pub fn datasets(&self, table: &TimeSeriesTable, countries: &[String]) -> Result<Vec<DataSet>> {
        countries
            .iter()
            .map(|country| -> Result<DataSet> {
                let series = self.selector.select(table, country)?;
                Ok(DataSet::from(series))
            })
            .collect()
    }

    /// Select every country and draw them on one chart at `path`.
    #[instrument(skip(self, table, countries, config), fields(count = countries.len()))]
    pub async fn render(
        &self,
        table: &TimeSeriesTable,
        countries: &[String],
        config: &GraphConfig,
        path: &Path,
    ) -> Result<()> {
        let datasets = self.datasets(table, countries)?;
        self.renderer.render_to_file(config, &datasets, path).await?;
        info!(path = %path.display(), "comparison chart written");
        Ok(())
    }
}

/// Draw `countries` from `table` with the default selector and renderer.
pub async fn render(
    table: &TimeSeriesTable,
    countries: &[String],
    config: &GraphConfig,
    path: &Path,
) -> Result<()> {
    CountryComparison::<LineChartRenderer>::default()
        .render(table, countries, config, path)
        .await
}
