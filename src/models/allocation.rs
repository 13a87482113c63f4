//! Allocation model.
//!
//! An [`Allocation`] charges a percentage of an RSE's time to a project over
//! an inclusive date range.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A percentage-of-time assignment of an RSE to a project.
///
/// # Example
///
/// ```
/// use rse_costing::models::Allocation;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let allocation = Allocation {
///     id: "alloc_001".to_string(),
///     rse_id: "rse_001".to_string(),
///     project: "climate-model".to_string(),
///     start: NaiveDate::from_ymd_opt(2017, 8, 1).unwrap(),
///     end: NaiveDate::from_ymd_opt(2018, 7, 31).unwrap(),
///     percentage: Decimal::new(50, 0),
/// };
/// assert!(allocation.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Unique identifier for the allocation.
    pub id: String,
    /// The RSE being allocated.
    pub rse_id: String,
    /// The project (or other purpose) being charged.
    pub project: String,
    /// First day of the allocation.
    pub start: NaiveDate,
    /// Last working day of the allocation (inclusive).
    pub end: NaiveDate,
    /// Share of the RSE's time, from 0 to 100.
    pub percentage: Decimal,
}

impl Allocation {
    /// Checks the percentage range and date ordering.
    pub fn validate(&self) -> EngineResult<()> {
        if self.percentage < Decimal::ZERO || self.percentage > Decimal::ONE_HUNDRED {
            return Err(EngineError::InvalidAllocation {
                allocation_id: self.id.clone(),
                message: format!("percentage {} is outside 0-100", self.percentage),
            });
        }
        if self.end < self.start {
            return Err(EngineError::InvalidAllocation {
                allocation_id: self.id.clone(),
                message: format!("ends {} before it starts {}", self.end, self.start),
            });
        }
        Ok(())
    }

    /// Returns the part of the allocation inside `window`, if any.
    ///
    /// With no window the whole allocation is returned.
    pub fn overlap(&self, window: Option<(NaiveDate, NaiveDate)>) -> Option<(NaiveDate, NaiveDate)> {
        let (from, until) = match window {
            Some((start, end)) => (self.start.max(start), self.end.min(end)),
            None => (self.start, self.end),
        };
        (from <= until).then_some((from, until))
    }
}
