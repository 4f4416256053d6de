//! In-memory time-series table.

use covidtrend_common::{ensure, KeyColumn, Result};

/// Number of leading identifying columns (province, country, lat, long).
pub const IDENTIFYING_COLUMNS: usize = 4;

/// One region: four identifying cells followed by one cell per date.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    cells: Vec<String>,
}

impl TableRow {
    /// `Province/State` cell; empty for national rows.
    pub fn province(&self) -> &str {
        &self.cells[0]
    }

    /// `Country/Region` cell.
    pub fn country(&self) -> &str {
        &self.cells[1]
    }

    /// Raw latitude cell.
    pub fn latitude(&self) -> &str {
        &self.cells[2]
    }

    /// Raw longitude cell.
    pub fn longitude(&self) -> &str {
        &self.cells[3]
    }

    /// Cell of the given identifying column.
    pub fn key(&self, column: KeyColumn) -> &str {
        &self.cells[column.index()]
    }

    /// Raw count cells in date column order.
    pub fn values(&self) -> &[String] {
        &self.cells[IDENTIFYING_COLUMNS..]
    }
}

/// A parsed CSSE time-series file.
///
/// Columns are addressed by position: the first [`IDENTIFYING_COLUMNS`] are
/// the identifying attributes whatever their header text, the rest are dates.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTable {
    headers: Vec<String>,
    rows: Vec<TableRow>,
}

impl TimeSeriesTable {
    /// Build a table, checking every row has one cell per header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        ensure!(
            headers.len() >= IDENTIFYING_COLUMNS,
            "expected at least {} identifying columns, found {}",
            IDENTIFYING_COLUMNS,
            headers.len()
        );

        let width = headers.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, cells)| {
                ensure!(
                    cells.len() == width,
                    "row {} has {} cells, expected {}",
                    i + 1,
                    cells.len(),
                    width
                );
                Ok(TableRow { cells })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { headers, rows })
    }

    /// Every column name in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The four identifying column names.
    pub fn identifying_columns(&self) -> &[String] {
        &self.headers[..IDENTIFYING_COLUMNS]
    }

    /// Date column names in file order.
    pub fn date_columns(&self) -> &[String] {
        &self.headers[IDENTIFYING_COLUMNS..]
    }

    /// All rows.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
