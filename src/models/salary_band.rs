//! Salary band and grade change models.
//!
//! A [`SalaryBand`] is the pay rate for one point of the grade scale in one
//! financial year. A [`GradeChange`] records that an RSE moved onto a band.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FinancialYear;

/// The pay rate for a (grade, grade point) in a specific financial year.
///
/// When `increments` is true an RSE on this band moves to `grade_point + 1`
/// the following financial year. When false the band is a ceiling: the grade
/// point stays put, though the amount still follows newer published data.
///
/// # Example
///
/// ```
/// use rse_costing::models::{FinancialYear, SalaryBand};
/// use rust_decimal::Decimal;
///
/// let band = SalaryBand {
///     grade: 7,
///     grade_point: 2,
///     financial_year: FinancialYear::new(2017),
///     salary: Decimal::new(3200000, 2),
///     increments: true,
/// };
/// assert_eq!(band.to_string(), "7.2 (2017/18)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBand {
    /// The grade.
    pub grade: u32,
    /// The point within the grade.
    pub grade_point: u32,
    /// The financial year this rate applies to.
    pub financial_year: FinancialYear,
    /// The annual salary.
    pub salary: Decimal,
    /// Whether an RSE on this band advances a grade point each year.
    pub increments: bool,
}

impl SalaryBand {
    /// Returns the lookup key of this band.
    pub fn key(&self) -> BandKey {
        BandKey {
            financial_year: self.financial_year,
            grade: self.grade,
            grade_point: self.grade_point,
        }
    }

    /// Returns the first day this band's rate applies.
    pub fn effective_from(&self) -> NaiveDate {
        self.financial_year.start_date()
    }
}

impl std::fmt::Display for SalaryBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{} ({})",
            self.grade, self.grade_point, self.financial_year
        )
    }
}

/// The unique key of a salary band.
///
/// Ordered by financial year first so that a sorted table groups each
/// year's scale together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BandKey {
    /// The financial year.
    pub financial_year: FinancialYear,
    /// The grade.
    pub grade: u32,
    /// The point within the grade.
    pub grade_point: u32,
}

impl BandKey {
    /// Creates a key from its parts.
    pub fn new(grade: u32, grade_point: u32, financial_year: FinancialYear) -> Self {
        Self {
            financial_year,
            grade,
            grade_point,
        }
    }
}

/// A real (recorded, not simulated) change of an RSE onto a salary band.
///
/// Covers hiring, promotion and confirmed annual increments. The change takes
/// effect on the first day of the band's financial year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeChange {
    /// The band the RSE moved onto.
    pub band: SalaryBand,
}

impl GradeChange {
    /// Creates a grade change onto `band`.
    pub fn new(band: SalaryBand) -> Self {
        Self { band }
    }

    /// Returns the date the change takes effect.
    pub fn effective_date(&self) -> NaiveDate {
        self.band.effective_from()
    }
}
