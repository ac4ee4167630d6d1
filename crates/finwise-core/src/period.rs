//! Calendar-month windows
//!
//! All engine and report windows are whole calendar months with inclusive
//! bounds, so a window is always `(first day, last day)`.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{Error, Result};

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First and last day of the month containing `date`
pub fn month_bounds(date: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let start = month_start(date);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| Error::InvalidData(format!("Date out of range: {}", date)))?;
    Ok((start, end))
}

/// Window covering `months` calendar months ending with the month of `date`
///
/// `months = 6` for a date in March 2024 yields 2023-10-01..=2024-03-31.
pub fn trailing_months(date: NaiveDate, months: u32) -> Result<(NaiveDate, NaiveDate)> {
    let (reference_start, end) = month_bounds(date)?;
    let start = reference_start
        .checked_sub_months(Months::new(months.saturating_sub(1)))
        .ok_or_else(|| Error::InvalidData(format!("Date out of range: {}", date)))?;
    Ok((start, end))
}

/// First day of the given month
pub fn month_of(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::Validation(format!("Invalid month: {}-{:02}", year, month)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(date(2024, 2, 14)).unwrap(),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            month_bounds(date(2023, 12, 31)).unwrap(),
            (date(2023, 12, 1), date(2023, 12, 31))
        );
    }

    #[test]
    fn test_trailing_months_crosses_year() {
        assert_eq!(
            trailing_months(date(2024, 3, 15), 6).unwrap(),
            (date(2023, 10, 1), date(2024, 3, 31))
        );
    }

    #[test]
    fn test_trailing_single_month() {
        assert_eq!(
            trailing_months(date(2024, 3, 15), 1).unwrap(),
            month_bounds(date(2024, 3, 15)).unwrap()
        );
    }

    #[test]
    fn test_month_of_rejects_invalid() {
        assert_eq!(month_of(2024, 5).unwrap(), date(2024, 5, 1));
        assert!(month_of(2024, 13).is_err());
        assert!(month_of(2024, 0).is_err());
    }
}
