//! Application level errors.

use covidtrend_common::TrendError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [`crate::App`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Failure inside one of the library crates
    #[error(transparent)]
    Trend(#[from] TrendError),

    /// Neither the command line nor the config names a country
    #[error("no countries to plot; pass --country or set chart.countries")]
    NoCountries,

    /// Writing command output failed
    #[error("failed to write output")]
    Output(#[source] std::io::Error),

    /// Output directory for the chart does not exist
    #[error("output directory {} does not exist", .0.display())]
    MissingOutputDir(PathBuf),
}

/// Result alias for application operations
pub type AppResult<T> = std::result::Result<T, AppError>;
