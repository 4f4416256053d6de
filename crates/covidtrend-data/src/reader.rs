//! Loading local case files into [`TimeSeriesTable`]s.

use covidtrend_common::{Case, Result};
use covidtrend_config::SourceConfig;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::TimeSeriesTable;

/// Reads case files from a data directory.
#[derive(Debug, Clone)]
pub struct Reader {
    data_dir: PathBuf,
}

impl Reader {
    /// Reader over `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Reader over the configured data directory.
    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(&config.data_dir)
    }

    /// Local path of a case file.
    pub fn path_for(&self, case: Case) -> PathBuf {
        self.data_dir.join(case.file_name())
    }

    /// Load the table for `case`. Fails if the file is missing or malformed.
    pub fn read(&self, case: Case) -> Result<TimeSeriesTable> {
        let path = self.path_for(case);
        let table = read_path(&path)?;
        info!(
            case = %case,
            rows = table.len(),
            dates = table.date_columns().len(),
            "loaded time series"
        );
        Ok(table)
    }

    /// Load confirmed cases.
    pub fn read_confirmed(&self) -> Result<TimeSeriesTable> {
        self.read(Case::Confirmed)
    }

    /// Load deaths.
    pub fn read_deaths(&self) -> Result<TimeSeriesTable> {
        self.read(Case::Deaths)
    }

    /// Load recoveries.
    pub fn read_recovered(&self) -> Result<TimeSeriesTable> {
        self.read(Case::Recovered)
    }
}

/// Parse the file at `path`.
pub fn read_path(path: &Path) -> Result<TimeSeriesTable> {
    debug!(path = %path.display(), "reading time series file");
    let file = File::open(path)?;
    read_from(file)
}

/// Parse comma separated data with a header row.
pub fn read_from<R: Read>(input: R) -> Result<TimeSeriesTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|record| Ok(record?.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>>>()?;

    TimeSeriesTable::new(headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use covidtrend_common::test_utils::{sample_csv, write_fixture_dir, SAMPLE_DATES, SAMPLE_ROWS};

    #[test]
    fn test_read_from_sample() {
        let table = read_from(sample_csv().as_bytes()).unwrap();

        assert_eq!(table.len(), SAMPLE_ROWS);
        assert_eq!(
            table.identifying_columns(),
            ["Province/State", "Country/Region", "Lat", "Long"]
        );
        assert_eq!(table.date_columns(), SAMPLE_DATES);
    }

    #[test]
    fn test_quoted_fields() {
        let data = "Province/State,Country/Region,Lat,Long,1/22/20\n\"Korea, South\",\"Korea, South\",36.0,128.0,1\n";
        let table = read_from(data.as_bytes()).unwrap();
        assert_eq!(table.rows()[0].country(), "Korea, South");
    }

    #[test]
    fn test_ragged_file_is_malformed() {
        let data = "a,b,c,d,1/22/20\n,X,0,0\n";
        assert!(read_from(data.as_bytes()).is_err());
    }

    #[test]
    fn test_reader_reads_every_case() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_dir(dir.path()).unwrap();
        let reader = Reader::new(dir.path());

        assert_eq!(reader.read_confirmed().unwrap().len(), SAMPLE_ROWS);
        assert_eq!(reader.read_deaths().unwrap().len(), SAMPLE_ROWS);
        assert_eq!(reader.read_recovered().unwrap().len(), SAMPLE_ROWS);
    }

    #[test]
    fn test_missing_file_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let err = Reader::new(dir.path()).read(Case::Deaths).unwrap_err();
        assert!(err.is_not_found());
    }
}
