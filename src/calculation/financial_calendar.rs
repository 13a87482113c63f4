//! Financial calendar rules.
//!
//! Financial years start on August 1st. A financial year is treated as exactly
//! 364 days after its start date, so the recorded end date is July 31st of the
//! next calendar year except when that span contains February 29th, in which
//! case it lands on July 30th. Cost integration relies on this convention; see
//! [`next_boundary_after`] for how the stray day is handled.

use chrono::{Datelike, Duration, NaiveDate};

/// Month in which every financial year starts.
pub const FINANCIAL_YEAR_START_MONTH: u32 = 8;

/// Number of days from the first to the last day of a financial year.
pub const FINANCIAL_YEAR_LENGTH_DAYS: i64 = 364;

/// Returns the first day of the financial year starting in `year`.
///
/// # Panics
///
/// Panics if `year` is outside the range `chrono` can represent.
///
/// # Example
///
/// ```
/// use rse_costing::calculation::start_of;
/// use chrono::NaiveDate;
///
/// assert_eq!(start_of(2017), NaiveDate::from_ymd_opt(2017, 8, 1).unwrap());
/// ```
pub fn start_of(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, FINANCIAL_YEAR_START_MONTH, 1)
        .expect("August 1st exists in every representable year")
}

/// Returns the last day of the financial year starting in `year`.
///
/// Always `start_of(year) + 364 days`; leap years are not special-cased.
///
/// # Example
///
/// ```
/// use rse_costing::calculation::end_of;
/// use chrono::NaiveDate;
///
/// assert_eq!(end_of(2017), NaiveDate::from_ymd_opt(2018, 7, 31).unwrap());
/// // The 2019 financial year contains 2020-02-29.
/// assert_eq!(end_of(2019), NaiveDate::from_ymd_opt(2020, 7, 30).unwrap());
/// ```
pub fn end_of(year: i32) -> NaiveDate {
    start_of(year) + Duration::days(FINANCIAL_YEAR_LENGTH_DAYS)
}

/// Returns the starting calendar year of the financial year containing `date`.
///
/// Dates from August onwards belong to the financial year starting that
/// calendar year; earlier dates belong to the one starting the year before.
pub fn financial_year_of(date: NaiveDate) -> i32 {
    if date.month() >= FINANCIAL_YEAR_START_MONTH {
        date.year()
    } else {
        date.year() - 1
    }
}

/// Returns true if `end` falls after the end of the financial year containing `start`.
///
/// The end of the financial year itself does not count as spanning; the day
/// after does.
///
/// # Example
///
/// ```
/// use rse_costing::calculation::spans_financial_year;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2017, 8, 1).unwrap();
/// assert!(!spans_financial_year(start, NaiveDate::from_ymd_opt(2018, 7, 31).unwrap()));
/// assert!(spans_financial_year(start, NaiveDate::from_ymd_opt(2018, 8, 1).unwrap()));
/// ```
pub fn spans_financial_year(start: NaiveDate, end: NaiveDate) -> bool {
    end > end_of(financial_year_of(start))
}

/// Returns the first financial-year boundary strictly after `date`.
///
/// This is normally the day after the end of the financial year containing
/// `date`. On the July 31st that follows a 364-day year containing February
/// 29th, that day is `date` itself, so the next year's boundary is used.
pub fn next_boundary_after(date: NaiveDate) -> NaiveDate {
    let year = financial_year_of(date);
    let boundary = end_of(year) + Duration::days(1);
    if boundary > date {
        boundary
    } else {
        end_of(year + 1) + Duration::days(1)
    }
}
