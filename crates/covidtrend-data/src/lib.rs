//! # covidtrend data
//!
//! Everything between the remote CSSE repository and a plottable series:
//!
//! - [`Fetcher`] downloads the three case files and writes a [`Manifest`].
//! - [`Reader`] parses a local case file into a [`TimeSeriesTable`].
//! - [`Selector`] extracts one country's [`CountrySeries`] from a table.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod date;
pub mod error;
pub mod fetcher;
pub mod manifest;
pub mod reader;
pub mod selector;
pub mod table;

pub use date::{normalize_date, ReportDate};
pub use error::SelectError;
pub use fetcher::{cleanup_dir, Fetcher};
pub use manifest::{Manifest, ManifestResource, MANIFEST_FILE};
pub use reader::{read_from, read_path, Reader};
pub use selector::{select, CountrySeries, RowMatch, Selector};
pub use table::{TableRow, TimeSeriesTable, IDENTIFYING_COLUMNS};
