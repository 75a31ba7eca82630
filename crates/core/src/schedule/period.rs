//! Calendar-month period keys.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `"YYYY-MM"` posting period. Lexicographic order of the string form
/// equals chronological order; the struct itself orders by (year, month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    /// The period containing the given date.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The year component.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// The month component (1-12).
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PeriodKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid period key: {s}"))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid period year: {s}"))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid period month: {s}"))?;
        if !(1..=12).contains(&month) {
            return Err(format!("Period month out of range: {s}"));
        }
        Ok(Self { year, month })
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PeriodKey> for String {
    fn from(key: PeriodKey) -> Self {
        key.to_string()
    }
}
