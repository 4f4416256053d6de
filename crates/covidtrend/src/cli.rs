//! Command line arguments

use clap::{Args, Parser, Subcommand};
use covidtrend_common::Case;
use std::path::PathBuf;

/// Fetch CSSE COVID-19 time series and compare countries on a log scale
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, overrides the configured level
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Subcommand to run; plotting with defaults when none was given.
    pub fn effective_command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Plot(PlotArgs::default()))
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Download the three case files and write the manifest
    Update,
    /// Remove the downloaded files and the manifest
    Cleanup,
    /// Draw the comparison chart
    Plot(PlotArgs),
    /// Print one country's dates and counts
    Series(SeriesArgs),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct PlotArgs {
    /// Metric to plot
    #[arg(long, default_value_t = Case::Confirmed)]
    pub case: Case,

    /// Country to plot, repeatable; replaces the configured list
    #[arg(long = "country", value_name = "COUNTRY")]
    pub countries: Vec<String>,

    /// Image path; `.svg` writes SVG, anything else a bitmap
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Download fresh data before plotting
    #[arg(long)]
    pub fetch: bool,
}

impl Default for PlotArgs {
    fn default() -> Self {
        Self {
            case: Case::Confirmed,
            countries: Vec::new(),
            output: None,
            fetch: false,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SeriesArgs {
    /// Country (or province, for overridden countries) to select
    #[arg(long)]
    pub country: String,

    /// Metric to read
    #[arg(long, default_value_t = Case::Confirmed)]
    pub case: Case,

    /// Print JSON instead of tab separated lines
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_plot() {
        let cli = Cli::try_parse_from(["covidtrend"]).unwrap();
        assert_eq!(cli.effective_command(), Command::Plot(PlotArgs::default()));
    }

    #[test]
    fn test_plot_arguments() {
        let cli = Cli::try_parse_from([
            "covidtrend",
            "--config",
            "trend.toml",
            "plot",
            "--case",
            "deaths",
            "--country",
            "Italy",
            "--country",
            "Spain",
            "-o",
            "out.svg",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("trend.toml")));
        let Command::Plot(args) = cli.effective_command() else {
            panic!("expected plot");
        };
        assert_eq!(args.case, Case::Deaths);
        assert_eq!(args.countries, vec!["Italy", "Spain"]);
        assert_eq!(args.output, Some(PathBuf::from("out.svg")));
        assert!(!args.fetch);
    }

    #[test]
    fn test_series_requires_country() {
        assert!(Cli::try_parse_from(["covidtrend", "series"]).is_err());

        let cli = Cli::try_parse_from(["covidtrend", "series", "--country", "France", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(
            cli.effective_command(),
            Command::Series(SeriesArgs { ref country, case: Case::Confirmed, json: false }) if country == "France"
        ));
    }

    #[test]
    fn test_country_names_keep_commas() {
        let cli = Cli::try_parse_from(["covidtrend", "plot", "--country", "Korea, South", "--country", "Japan"]).unwrap();
        let Command::Plot(args) = cli.effective_command() else {
            panic!("expected plot");
        };
        assert_eq!(args.countries, vec!["Korea, South", "Japan"]);
    }

    #[test]
    fn test_unknown_case_rejected() {
        assert!(Cli::try_parse_from(["covidtrend", "plot", "--case", "hospitalised"]).is_err());
    }
}
