//! # covidtrend graphs
//!
//! Chart configuration, the [`GraphRenderer`] trait with its log-scale
//! [`LineChartRenderer`], and [`CountryComparison`], which turns a time-series
//! table and a list of countries into a rendered chart.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod comparison;
pub mod renderer;
pub mod types;

pub use comparison::{render, CountryComparison};
pub use renderer::{tick_indices, GraphRenderer, LineChartRenderer};
pub use types::*;
