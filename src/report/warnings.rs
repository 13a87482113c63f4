//! Report warning construction.
//!
//! Maps engine errors and caller-side fallbacks onto [`ReportWarning`]s.

use chrono::NaiveDate;

use crate::error::EngineError;
use crate::models::ReportWarning;

/// Severity of a warning whose allocation was still costed.
pub const SEVERITY_MEDIUM: &str = "medium";

/// Severity of a warning whose allocation was left out of the totals.
pub const SEVERITY_HIGH: &str = "high";

impl ReportWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        allocation_id: impl Into<String>,
        severity: &str,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            allocation_id: allocation_id.into(),
            severity: severity.to_string(),
        }
    }

    /// Creates the warning for an allocation omitted because costing failed.
    pub fn from_error(allocation_id: &str, error: &EngineError) -> Self {
        let code = match error {
            EngineError::NoSalaryData { .. } => "NO_SALARY_DATA",
            EngineError::IncompleteSalaryData { .. } => "INCOMPLETE_SALARY_DATA",
            EngineError::InvalidAllocation { .. } => "INVALID_ALLOCATION",
            EngineError::InvalidDate { .. } | EngineError::InvalidDateRange { .. } => {
                "INVALID_DATE"
            }
            _ => "CALCULATION_ERROR",
        };
        Self::new(code, error.to_string(), allocation_id, SEVERITY_HIGH)
    }

    /// Creates the warning for an allocation costed from a later start date.
    pub fn partial_period(allocation_id: &str, requested: NaiveDate, costed_from: NaiveDate) -> Self {
        Self::new(
            "PARTIAL_PERIOD",
            format!(
                "No salary data before {}; costed from {} instead of {}",
                costed_from, costed_from, requested
            ),
            allocation_id,
            SEVERITY_MEDIUM,
        )
    }

    /// Creates the warning for an allocation whose RSE is not on record.
    pub fn unknown_rse(allocation_id: &str, rse_id: &str) -> Self {
        Self::new(
            "UNKNOWN_RSE",
            format!("RSE '{}' not found", rse_id),
            allocation_id,
            SEVERITY_HIGH,
        )
    }

    /// Creates the warning for an allocation outside the RSE's employment.
    pub fn outside_employment(allocation_id: &str, rse_id: &str) -> Self {
        Self::new(
            "OUTSIDE_EMPLOYMENT",
            format!("RSE '{}' is not employed during the allocation", rse_id),
            allocation_id,
            SEVERITY_MEDIUM,
        )
    }
}
