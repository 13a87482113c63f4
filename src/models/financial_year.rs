//! Financial year model.
//!
//! A [`FinancialYear`] is identified by the calendar year in which it starts.
//! The boundary rule itself lives in [`crate::calculation`]'s financial
//! calendar; this type is the strongly-typed handle the rest of the crate uses.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::{end_of, financial_year_of, start_of};

/// A financial year, running from August 1st of `year` to July 31st of the next.
///
/// # Example
///
/// ```
/// use rse_costing::models::FinancialYear;
/// use chrono::NaiveDate;
///
/// let fy = FinancialYear::new(2017);
/// assert_eq!(fy.start_date(), NaiveDate::from_ymd_opt(2017, 8, 1).unwrap());
/// assert_eq!(fy.end_date(), NaiveDate::from_ymd_opt(2018, 7, 31).unwrap());
/// assert_eq!(fy.to_string(), "2017/18");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinancialYear(i32);

impl FinancialYear {
    /// Creates the financial year starting in the given calendar year.
    pub fn new(year: i32) -> Self {
        Self(year)
    }

    /// Returns the financial year that contains `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self(financial_year_of(date))
    }

    /// Returns the calendar year in which this financial year starts.
    pub fn year(self) -> i32 {
        self.0
    }

    /// Returns the first day of the financial year.
    pub fn start_date(self) -> NaiveDate {
        start_of(self.0)
    }

    /// Returns the last day of the financial year.
    pub fn end_date(self) -> NaiveDate {
        end_of(self.0)
    }

    /// Returns the following financial year.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<i32> for FinancialYear {
    fn from(year: i32) -> Self {
        Self(year)
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}", self.0, (self.0 + 1).rem_euclid(100))
    }
}
