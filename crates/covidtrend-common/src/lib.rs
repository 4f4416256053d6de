//! # covidtrend common
//!
//! Shared types, errors and logging setup for the covidtrend workspace.
//!
//! Every other crate in the workspace builds on the [`TrendError`] type and
//! the [`Case`] / [`KeyColumn`] vocabulary defined here.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod macros;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, TrendError};
pub use logging::{init_cli_logging, init_default_logging, init_logging, LoggingConfig};
pub use types::*;
