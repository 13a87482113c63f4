//! RSE (Research Software Engineer) model.
//!
//! This module defines the [`Rse`] record the costing engine works from: the
//! employee's identity, employment dates and grade-change history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::GradeLedger;

use super::{GradeChange, SalaryBand};

/// A Research Software Engineer whose salary is projected and costed.
///
/// The grade-change history is held in a [`GradeLedger`], which keeps the
/// changes ordered newest first however they were supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rse {
    /// Unique identifier for the RSE.
    pub id: String,
    /// Display name.
    pub name: String,
    /// First day of employment.
    pub employed_from: NaiveDate,
    /// Last day of employment, if the contract has an end.
    #[serde(default)]
    pub employed_until: Option<NaiveDate>,
    /// Recorded grade changes.
    #[serde(default)]
    pub grade_changes: GradeLedger,
}

impl Rse {
    /// Creates an RSE with no grade changes and an open-ended contract.
    pub fn new(id: impl Into<String>, name: impl Into<String>, employed_from: NaiveDate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            employed_from,
            employed_until: None,
            grade_changes: GradeLedger::default(),
        }
    }

    /// Adds a grade change onto `band`, returning the updated record.
    ///
    /// # Example
    ///
    /// ```
    /// use rse_costing::models::{FinancialYear, Rse, SalaryBand};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let rse = Rse::new("rse_001", "Ada", NaiveDate::from_ymd_opt(2017, 8, 1).unwrap())
    ///     .with_grade_change(SalaryBand {
    ///         grade: 7,
    ///         grade_point: 1,
    ///         financial_year: FinancialYear::new(2017),
    ///         salary: Decimal::new(31604, 0),
    ///         increments: true,
    ///     });
    /// assert_eq!(rse.first_change_date(), NaiveDate::from_ymd_opt(2017, 8, 1));
    /// ```
    pub fn with_grade_change(mut self, band: SalaryBand) -> Self {
        self.grade_changes.record(GradeChange::new(band));
        self
    }

    /// Returns true if any day of `[start, end]` falls within employment.
    pub fn employed_in_period(&self, start: NaiveDate, end: NaiveDate) -> bool {
        let started_in_time = self.employed_from <= end;
        let not_left_before = self.employed_until.is_none_or(|until| until >= start);
        started_in_time && not_left_before
    }

    /// Returns the effective date of the earliest recorded grade change.
    pub fn first_change_date(&self) -> Option<NaiveDate> {
        self.grade_changes.earliest().map(GradeChange::effective_date)
    }
}
