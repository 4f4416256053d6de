//! # covidtrend config
//!
//! Type-safe configuration for covidtrend.
//!
//! Configuration is read from a TOML file, overlaid with `COVIDTREND_*`
//! environment variables and validated before use. Every field has a
//! default, so an empty file (or no file at all) is a valid configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validation::*;
