//! Business-day arithmetic.
//!
//! Weekdays are Monday to Friday; public holidays are not considered.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};

/// Returns true for Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn weekdays_of_month(year: i32, month: u32) -> EngineResult<impl Iterator<Item = NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(EngineError::InvalidMonth { year, month })?;

    Ok(first
        .iter_days()
        .take_while(move |d| d.month() == month)
        .filter(|d| is_weekday(*d)))
}

/// Returns the date of the `n`th weekday (Mon–Fri) of the given month.
///
/// Counting starts at 1 on the first weekday of the month.
///
/// # Errors
///
/// - [`EngineError::InvalidMonth`] when `month` is outside 1..=12
/// - [`EngineError::WeekdayOutOfRange`] when `n` is zero or the month has
///   fewer than `n` weekdays
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::nth_weekday_of_month;
/// use chrono::NaiveDate;
///
/// // September 2024 starts on a Sunday
/// let fifth = nth_weekday_of_month(2024, 9, 5).unwrap();
/// assert_eq!(fifth, NaiveDate::from_ymd_opt(2024, 9, 6).unwrap());
/// ```
pub fn nth_weekday_of_month(year: i32, month: u32, n: u32) -> EngineResult<NaiveDate> {
    let out_of_range = EngineError::WeekdayOutOfRange { n, year, month };
    if n == 0 {
        // still surface a bad month first
        weekdays_of_month(year, month)?;
        return Err(out_of_range);
    }

    weekdays_of_month(year, month)?
        .nth((n - 1) as usize)
        .ok_or(out_of_range)
}

/// Number of weekdays in the given month.
pub fn weekdays_in_month(year: i32, month: u32) -> EngineResult<u32> {
    Ok(weekdays_of_month(year, month)?.count() as u32)
}

/// Returns true once `today` is strictly after the `n`th weekday of its month.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::is_after_business_day_cutoff;
/// use chrono::NaiveDate;
///
/// let cutoff_day = NaiveDate::from_ymd_opt(2024, 9, 6).unwrap();
/// let next_day = NaiveDate::from_ymd_opt(2024, 9, 7).unwrap();
/// assert!(!is_after_business_day_cutoff(cutoff_day, 5).unwrap());
/// assert!(is_after_business_day_cutoff(next_day, 5).unwrap());
/// ```
pub fn is_after_business_day_cutoff(today: NaiveDate, n: u32) -> EngineResult<bool> {
    let cutoff = nth_weekday_of_month(today.year(), today.month(), n)?;
    Ok(today > cutoff)
}
