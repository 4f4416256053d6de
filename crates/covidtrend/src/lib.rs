//! # covidtrend
//!
//! Command line front end tying the workspace together: [`Cli`] parses the
//! arguments and [`App`] runs the chosen command against a loaded
//! configuration.

#![warn(clippy::all)]

pub mod app;
pub mod cli;
pub mod error;

pub use app::App;
pub use cli::{Cli, Command, PlotArgs, SeriesArgs};
pub use error::{AppError, AppResult};
