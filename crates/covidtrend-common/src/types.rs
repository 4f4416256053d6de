//! Common types used across the covidtrend crates

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TrendError;

/// Prefix shared by every CSSE time-series file name.
pub const FILE_PREFIX: &str = "time_series_19-covid-";

/// One of the three tracked metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    /// Cumulative confirmed cases
    Confirmed,
    /// Cumulative deaths
    Deaths,
    /// Cumulative recoveries
    Recovered,
}

impl Case {
    /// Cases in download order.
    pub const ALL: [Case; 3] = [Case::Confirmed, Case::Recovered, Case::Deaths];

    /// Capitalised name as it appears in the remote file name.
    pub fn name(self) -> &'static str {
        match self {
            Case::Confirmed => "Confirmed",
            Case::Deaths => "Deaths",
            Case::Recovered => "Recovered",
        }
    }

    /// File stem, e.g. `time_series_19-covid-Confirmed`.
    pub fn resource_name(self) -> String {
        format!("{FILE_PREFIX}{}", self.name())
    }

    /// File name, e.g. `time_series_19-covid-Confirmed.csv`.
    pub fn file_name(self) -> String {
        format!("{}.csv", self.resource_name())
    }

    /// Default y-axis label for charts of this case.
    pub fn axis_label(self) -> &'static str {
        match self {
            Case::Confirmed => "Confirmed cases",
            Case::Deaths => "Deaths",
            Case::Recovered => "Recovered cases",
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Case {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Ok(Case::Confirmed),
            "deaths" | "death" => Ok(Case::Deaths),
            "recovered" => Ok(Case::Recovered),
            other => Err(TrendError::validation_field(
                format!("unknown case '{other}', expected confirmed, deaths or recovered"),
                "case",
            )),
        }
    }
}

/// Identifying column used to match a country against a table row.
///
/// The source data keys national rows by `Country/Region`, but some
/// countries (France) keep their mainland row under `Province/State`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyColumn {
    /// First identifying column (`Province/State`)
    Province,
    /// Second identifying column (`Country/Region`)
    #[default]
    Country,
}

impl KeyColumn {
    /// Position of the column within the identifying block.
    pub fn index(self) -> usize {
        match self {
            KeyColumn::Province => 0,
            KeyColumn::Country => 1,
        }
    }
}

impl fmt::Display for KeyColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyColumn::Province => f.write_str("Province/State"),
            KeyColumn::Country => f.write_str("Country/Region"),
        }
    }
}
