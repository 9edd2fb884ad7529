//! Calendar-month accounting periods.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A calendar-month token such as `"2024-05"`.
///
/// Declarations are keyed by `(community, kind, period)`, so the token is
/// validated at the edge and kept structural from then on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=9999).contains(&year) {
            return Err(PeriodParseError::YearOutOfRange(year));
        }
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::Malformed(s.to_string()))?;
        if year.len() != 4 || month.len() != 2 {
            return Err(PeriodParseError::Malformed(s.to_string()));
        }
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::Malformed(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::Malformed(s.to_string()))?;
        Self::new(year, month)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for Period {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> String {
        period.to_string()
    }
}

/// Errors produced while parsing a period token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    #[error("period must be formatted as YYYY-MM, got '{0}'")]
    Malformed(String),

    #[error("period month {0} is out of range 1..=12")]
    MonthOutOfRange(u32),

    #[error("period year {0} is out of range")]
    YearOutOfRange(i32),
}
