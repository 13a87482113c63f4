//! Error types for the RSE costing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while projecting salaries and
//! costing allocations.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the RSE costing engine.
///
/// All operations in the engine return this error type. Lookup failures are
/// never turned into a zero cost; they propagate to the caller, which decides
/// how to present them.
///
/// # Example
///
/// ```
/// use rse_costing::error::EngineError;
/// use chrono::NaiveDate;
///
/// let error = EngineError::NoSalaryData {
///     rse_id: "rse_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2017, 7, 1).unwrap(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "No salary data for RSE 'rse_001' on or before 2017-07-01"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The RSE has no grade change at or before the requested date.
    #[error("No salary data for RSE '{rse_id}' on or before {date}")]
    NoSalaryData {
        /// The RSE being costed.
        rse_id: String,
        /// The date for which a grade change was requested.
        date: NaiveDate,
    },

    /// The band table has a gap that prevents increment simulation.
    #[error(
        "Incomplete salary data: cannot increment grade {grade}.{grade_point} from financial year {year}"
    )]
    IncompleteSalaryData {
        /// Grade of the band being incremented.
        grade: u32,
        /// Grade point of the band being incremented.
        grade_point: u32,
        /// Financial year of the band being incremented.
        year: i32,
    },

    /// A projection was requested for a date before the grade change took effect.
    #[error("Invalid date {date}: grade change is only effective from {effective_from}")]
    InvalidDate {
        /// The requested date.
        date: NaiveDate,
        /// The date the grade change takes effect.
        effective_from: NaiveDate,
    },

    /// No band exists for the given grade, grade point and financial year.
    #[error("Salary band not found: grade {grade}.{grade_point} in financial year {year}")]
    BandNotFound {
        /// The grade.
        grade: u32,
        /// The grade point.
        grade_point: u32,
        /// The financial year.
        year: i32,
    },

    /// A second band was supplied for an existing (grade, grade point, year) key.
    #[error("Duplicate salary band: grade {grade}.{grade_point} in financial year {year}")]
    DuplicateBand {
        /// The grade.
        grade: u32,
        /// The grade point.
        grade_point: u32,
        /// The financial year.
        year: i32,
    },

    /// An allocation record was invalid or contained inconsistent data.
    #[error("Invalid allocation '{allocation_id}': {message}")]
    InvalidAllocation {
        /// The ID of the invalid allocation.
        allocation_id: String,
        /// A description of what made the allocation invalid.
        message: String,
    },

    /// A cost query ended before it started.
    #[error("Invalid date range: {end} is before {start}")]
    InvalidDateRange {
        /// Start of the range.
        start: NaiveDate,
        /// End of the range (inclusive).
        end: NaiveDate,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A worker task of a cost report did not complete.
    #[error("Report task failed: {message}")]
    ReportTaskFailed {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
