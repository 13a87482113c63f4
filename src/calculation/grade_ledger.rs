//! Grade-change ledger.
//!
//! An RSE's recorded grade changes, kept newest first so the most recent
//! change at or before a date is found with a single binary search.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{GradeChange, Rse};

/// An RSE's grade changes ordered by effective date, newest first.
///
/// Serializes as a chronological list. Within one financial year the most
/// recently recorded change comes first and therefore wins lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<GradeChange>", into = "Vec<GradeChange>")]
pub struct GradeLedger {
    changes: Vec<GradeChange>,
}

impl GradeLedger {
    /// Adds a grade change in date order.
    pub fn record(&mut self, change: GradeChange) {
        let effective = change.effective_date();
        let index = self
            .changes
            .partition_point(|c| c.effective_date() > effective);
        self.changes.insert(index, change);
    }

    /// Returns the most recent change effective at or before `date`.
    pub fn last_before(&self, date: NaiveDate) -> Option<&GradeChange> {
        let index = self.changes.partition_point(|c| c.effective_date() > date);
        self.changes.get(index)
    }

    /// Returns the most recent change.
    pub fn latest(&self) -> Option<&GradeChange> {
        self.changes.first()
    }

    /// Returns the earliest change.
    pub fn earliest(&self) -> Option<&GradeChange> {
        self.changes.last()
    }

    /// Iterates over the changes, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &GradeChange> {
        self.changes.iter()
    }

    /// Returns the number of recorded changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns true if no change has been recorded.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl From<Vec<GradeChange>> for GradeLedger {
    fn from(changes: Vec<GradeChange>) -> Self {
        let mut ledger = Self::default();
        for change in changes {
            ledger.record(change);
        }
        ledger
    }
}

impl From<GradeLedger> for Vec<GradeChange> {
    fn from(ledger: GradeLedger) -> Self {
        let mut changes = ledger.changes;
        changes.reverse();
        changes
    }
}

/// Finds the RSE's most recent real grade change at or before `date`.
///
/// Fails with `NoSalaryData` when the RSE has no change that early, including
/// when they have none at all. That means the RSE cannot be costed for the
/// date; it is never a zero salary.
///
/// # Example
///
/// ```
/// use rse_costing::calculation::last_change_before;
/// use rse_costing::error::EngineError;
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
///
/// let change = last_change_before(&rse, NaiveDate::from_ymd_opt(2018, 3, 1).unwrap())?;
/// assert_eq!(change.band.grade_point, 1);
///
/// let too_early = last_change_before(&rse, NaiveDate::from_ymd_opt(2017, 7, 31).unwrap());
/// assert!(matches!(too_early, Err(EngineError::NoSalaryData { .. })));
/// # Ok::<(), EngineError>(())
/// ```
pub fn last_change_before(rse: &Rse, date: NaiveDate) -> EngineResult<&GradeChange> {
    rse.grade_changes
        .last_before(date)
        .ok_or_else(|| EngineError::NoSalaryData {
            rse_id: rse.id.clone(),
            date,
        })
}
