//! Calendar month used as the payroll reference period.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month (year + month) that a payroll run refers to.
///
/// Serializes as `"YYYY-MM"`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ReferenceMonth;
/// use chrono::NaiveDate;
///
/// let month = ReferenceMonth::from_date(NaiveDate::from_ymd_opt(2024, 9, 18).unwrap());
/// assert_eq!(month.to_string(), "2024-09");
/// assert!(month.contains(NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()));
/// assert!(!month.contains(NaiveDate::from_ymd_opt(2023, 9, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferenceMonth {
    year: i32,
    month: u32,
}

impl ReferenceMonth {
    /// Creates a reference month, rejecting months outside 1..=12.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidMonth { year, month });
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month number, 1-based.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns true if `date` falls in the same year and month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for ReferenceMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for ReferenceMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidMonth { year: 0, month: 0 };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for ReferenceMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReferenceMonth> for String {
    fn from(month: ReferenceMonth) -> Self {
        month.to_string()
    }
}
