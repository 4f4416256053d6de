//! Report dates as they appear in the CSSE column headers.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::SelectError;

/// A date column header (`M/D/YY`), kept as a real calendar date.
///
/// The chart only ever shows day and month, but the year is retained so
/// that series remain comparable across year boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportDate(NaiveDate);

impl ReportDate {
    /// Parse a `month/day/year` header. Two-digit years are 20YY.
    pub fn parse(value: &str) -> Result<Self, SelectError> {
        let invalid = |reason: &str| SelectError::InvalidDate {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = value.trim().split('/').collect();
        let [month, day, year] = parts.as_slice() else {
            return Err(invalid("expected month/day/year"));
        };

        let month: u32 = month.parse().map_err(|_| invalid("month is not a number"))?;
        let day: u32 = day.parse().map_err(|_| invalid("day is not a number"))?;
        let year: i32 = year.parse().map_err(|_| invalid("year is not a number"))?;
        let year = match year {
            0..=99 => 2000 + year,
            1000..=9999 => year,
            _ => return Err(invalid("year must have two or four digits")),
        };

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| invalid("not a calendar date"))
    }

    /// Underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Display label `D/M`. The year is dropped.
    pub fn label(&self) -> String {
        format!("{}/{}", self.0.day(), self.0.month())
    }
}

impl From<NaiveDate> for ReportDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for ReportDate {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// `M/D/YY` within 2000-2099 and `M/D/YYYY` for other four-digit years, so
/// every parsed date prints back to a header that parses to the same date.
impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (month, day, year) = (self.0.month(), self.0.day(), self.0.year());
        if (2000..=2099).contains(&year) {
            write!(f, "{month}/{day}/{:02}", year - 2000)
        } else {
            write!(f, "{month}/{day}/{year}")
        }
    }
}

/// Rewrite a `month/day/year` header into its `day/month` display form.
///
/// This is lossy: `normalize_date("3/5/20")` is `"5/3"` and the year is gone.
pub fn normalize_date(value: &str) -> Result<String, SelectError> {
    ReportDate::parse(value).map(|d| d.label())
}
