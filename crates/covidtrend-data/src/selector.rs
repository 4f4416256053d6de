//! Country row selection and series normalization.

use covidtrend_common::KeyColumn;
use covidtrend_config::{KeyOverrides, SelectionConfig};
use tracing::debug;

use crate::{ReportDate, SelectError, TableRow, TimeSeriesTable};

/// Outcome of looking a country up in a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowMatch<'a> {
    /// No row matched.
    NotFound,
    /// Exactly one row matched.
    Found(&'a TableRow),
    /// Several rows matched; carries the count.
    Ambiguous(usize),
}

/// Dates and counts for one country, positionally aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountrySeries {
    /// Identifier the series was selected by.
    pub country: String,
    /// One entry per date column, in table order.
    pub dates: Vec<ReportDate>,
    /// Cumulative count for each entry of `dates`.
    pub counts: Vec<i64>,
}

impl CountrySeries {
    /// `D/M` display labels.
    pub fn labels(&self) -> Vec<String> {
        self.dates.iter().map(ReportDate::label).collect()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Latest cumulative count.
    pub fn latest(&self) -> Option<i64> {
        self.counts.last().copied()
    }

    /// `(labels, counts)` pair as shown on the chart.
    pub fn into_display(self) -> (Vec<String>, Vec<i64>) {
        (self.labels(), self.counts)
    }
}

/// Picks a country's row and turns it into a [`CountrySeries`].
///
/// Countries are matched on `Country/Region` unless the override table
/// names a different identifying column for them.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    config: SelectionConfig,
}

impl Default for Selector {
    fn default() -> Self {
        Self::from(&SelectionConfig::default())
    }
}

impl From<&SelectionConfig> for Selector {
    fn from(config: &SelectionConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl Selector {
    /// Selector with an explicit override table.
    pub fn new(key_overrides: KeyOverrides) -> Self {
        Self {
            config: SelectionConfig { key_overrides },
        }
    }

    /// Column `country` is matched on.
    pub fn key_for(&self, country: &str) -> KeyColumn {
        self.config.key_for(country)
    }

    /// Find the row for `country`.
    pub fn find_row<'a>(&self, table: &'a TimeSeriesTable, country: &str) -> RowMatch<'a> {
        let column = self.key_for(country);
        let mut matches = table.rows().iter().filter(|row| row.key(column) == country);

        match (matches.next(), matches.count()) {
            (None, _) => RowMatch::NotFound,
            (Some(row), 0) => RowMatch::Found(row),
            (Some(_), rest) => RowMatch::Ambiguous(rest + 1),
        }
    }

    /// Extract the aligned date/count series for `country`.
    pub fn select(
        &self,
        table: &TimeSeriesTable,
        country: &str,
    ) -> Result<CountrySeries, SelectError> {
        let column = self.key_for(country);
        let row = match self.find_row(table, country) {
            RowMatch::Found(row) => row,
            RowMatch::NotFound => {
                return Err(SelectError::NotFound {
                    country: country.to_string(),
                    column,
                })
            }
            RowMatch::Ambiguous(matches) => {
                return Err(SelectError::Ambiguous {
                    country: country.to_string(),
                    column,
                    matches,
                })
            }
        };

        let mut dates = Vec::with_capacity(table.date_columns().len());
        let mut counts = Vec::with_capacity(table.date_columns().len());
        for (header, cell) in table.date_columns().iter().zip(row.values()) {
            let count = parse_count(cell).ok_or_else(|| SelectError::InvalidCount {
                country: country.to_string(),
                date: header.clone(),
                value: cell.clone(),
            })?;
            counts.push(count);
            dates.push(ReportDate::parse(header)?);
        }

        debug!(country, %column, points = counts.len(), "selected series");
        Ok(CountrySeries {
            country: country.to_string(),
            dates,
            counts,
        })
    }
}

/// Select `country` with the default override table.
pub fn select(table: &TimeSeriesTable, country: &str) -> Result<CountrySeries, SelectError> {
    Selector::default().select(table, country)
}

/// Integer count, also accepting floats with no fractional part (`5.0`).
fn parse_count(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    if let Ok(value) = cell.parse::<i64>() {
        return Some(value);
    }
    let value = cell.parse::<f64>().ok()?;
    (value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15).then(|| value as i64)
}
