//! Orchestration of fetch, read, select and render.

use covidtrend_common::Case;
use covidtrend_config::Config;
use covidtrend_data::{CountrySeries, Fetcher, Manifest, Reader, Selector};
use covidtrend_graphs::{CountryComparison, GraphConfig};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::cli::{Command, PlotArgs, SeriesArgs};
use crate::error::{AppError, AppResult};

/// Runs CLI commands against a loaded configuration.
#[derive(Debug, Clone)]
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Dispatch one command. Series output goes to `out`.
    pub async fn run<W: Write>(&self, command: Command, out: &mut W) -> AppResult<()> {
        match command {
            Command::Update => {
                self.run_update().await?;
            }
            Command::Cleanup => {
                let removed = self.run_cleanup()?;
                writeln!(out, "removed {removed} file(s)").map_err(AppError::Output)?;
            }
            Command::Plot(args) => {
                let path = self.run_plot(&args).await?;
                writeln!(out, "{}", path.display()).map_err(AppError::Output)?;
            }
            Command::Series(args) => {
                self.run_series(&args, out)?;
            }
        }
        Ok(())
    }

    /// Download every case file and write the manifest.
    pub async fn run_update(&self) -> AppResult<Manifest> {
        let fetcher = Fetcher::new(&self.config.source)?;
        Ok(fetcher.update().await?)
    }

    /// Delete the local files; returns how many were removed.
    pub fn run_cleanup(&self) -> AppResult<usize> {
        Ok(covidtrend_data::cleanup_dir(&self.config.source.data_dir)?)
    }

    /// Draw the comparison chart and return where it was written.
    pub async fn run_plot(&self, args: &PlotArgs) -> AppResult<PathBuf> {
        let chart = &self.config.chart;
        let countries = if args.countries.is_empty() {
            chart.countries.clone()
        } else {
            args.countries.clone()
        };
        if countries.iter().all(|c| c.trim().is_empty()) {
            return Err(AppError::NoCountries);
        }

        let output = args.output.clone().unwrap_or_else(|| chart.output.clone());
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                return Err(AppError::MissingOutputDir(parent.to_path_buf()));
            }
        }

        if args.fetch {
            self.run_update().await?;
        }

        let table = self.reader().read(args.case)?;
        let graph = GraphConfig::from_chart(chart, args.case);
        CountryComparison::new(self.selector())
            .render(&table, &countries, &graph, &output)
            .await?;

        info!(case = %args.case, countries = countries.len(), output = %output.display(), "plot complete");
        Ok(output)
    }

    /// Select one country's series and print it to `out`.
    pub fn run_series<W: Write>(&self, args: &SeriesArgs, out: &mut W) -> AppResult<CountrySeries> {
        let series = self.series(args.case, &args.country)?;

        if args.json {
            let value = serde_json::json!({
                "country": &series.country,
                "case": args.case,
                "dates": series.labels(),
                "counts": &series.counts,
            });
            writeln!(out, "{value}").map_err(AppError::Output)?;
        } else {
            for (label, count) in series.labels().iter().zip(&series.counts) {
                writeln!(out, "{label}\t{count}").map_err(AppError::Output)?;
            }
        }
        Ok(series)
    }

    /// Read `case` and select `country` from it.
    pub fn series(&self, case: Case, country: &str) -> AppResult<CountrySeries> {
        let table = self.reader().read(case)?;
        let series = self
            .selector()
            .select(&table, country)
            .map_err(covidtrend_common::TrendError::from)?;
        Ok(series)
    }

    fn reader(&self) -> Reader {
        Reader::from_config(&self.config.source)
    }

    fn selector(&self) -> Selector {
        Selector::from(&self.config.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covidtrend_common::test_utils::{fixture_dir, SAMPLE_DATES};

    fn app_for(dir: &std::path::Path) -> App {
        let mut config = Config::default();
        config.source.data_dir = dir.to_path_buf();
        App::new(config)
    }

    #[test]
    fn test_series_text_output() {
        let dir = fixture_dir();
        let app = app_for(dir.path());
        let mut out = Vec::new();

        let args = SeriesArgs {
            country: "Germany".to_string(),
            case: Case::Confirmed,
            json: false,
        };
        let series = app.run_series(&args, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), SAMPLE_DATES.len());
        assert_eq!(text.lines().next(), Some("22/1\t0"));
        assert_eq!(text.lines().last(), Some("31/1\t5"));
        assert_eq!(series.latest(), Some(5));
    }

    #[test]
    fn test_series_json_output() {
        let dir = fixture_dir();
        let app = app_for(dir.path());
        let mut out = Vec::new();

        let args = SeriesArgs {
            country: "France".to_string(),
            case: Case::Deaths,
            json: true,
        };
        app.run_series(&args, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["country"], "France");
        assert_eq!(value["case"], "deaths");
        assert_eq!(value["dates"][0], "22/1");
        assert_eq!(value["counts"][9], 5);
    }

    #[test]
    fn test_series_unknown_country() {
        let dir = fixture_dir();
        let err = app_for(dir.path()).series(Case::Confirmed, "Atlantis").unwrap_err();
        assert!(matches!(err, AppError::Trend(_)));
        assert!(err.to_string().contains("Atlantis"));
    }

    #[test]
    fn test_cleanup_twice() {
        let dir = fixture_dir();
        let app = app_for(dir.path());
        assert_eq!(app.run_cleanup().unwrap(), 3);
        assert_eq!(app.run_cleanup().unwrap(), 0);
    }

    #[test]
    fn test_plot_without_countries() {
        let dir = fixture_dir();
        let mut app = app_for(dir.path());
        app.config.chart.countries = vec![" ".to_string()];

        let err = tokio_test::block_on(app.run_plot(&PlotArgs::default())).unwrap_err();
        assert!(matches!(err, AppError::NoCountries));
    }

    #[tokio::test]
    async fn test_plot_into_missing_directory() {
        let dir = fixture_dir();
        let app = app_for(dir.path());
        let args = PlotArgs {
            output: Some(dir.path().join("nope").join("chart.png")),
            ..PlotArgs::default()
        };

        let err = app.run_plot(&args).await.unwrap_err();
        assert!(matches!(err, AppError::MissingOutputDir(_)));
    }

    #[tokio::test]
    async fn test_plot_missing_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_for(dir.path());
        let args = PlotArgs {
            output: Some(dir.path().join("chart.svg")),
            ..PlotArgs::default()
        };

        match app.run_plot(&args).await.unwrap_err() {
            AppError::Trend(err) => assert!(err.is_not_found()),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
