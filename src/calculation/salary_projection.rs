//! Salary projection.
//!
//! Resolves the salary band that applies to an RSE on any date from their
//! recorded grade changes, simulating annual increments where no newer real
//! change exists.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{GradeChange, Rse, SalaryBand};

use super::band_table::{SalaryBandTable, band_after_increment};
use super::financial_calendar::spans_financial_year;
use super::grade_ledger::last_change_before;

/// Length of one simulated increment step in days.
const DAYS_PER_INCREMENT: i64 = 365;

/// Projects the band of `change` forward to `date`.
///
/// # Behavior
///
/// - `date` before the change took effect fails with `InvalidDate`.
/// - Within the change's own financial year the change's band applies.
/// - If the RSE has a real change that is later than `change` and effective
///   at or before `date`, projection restarts from that change.
/// - Otherwise one increment is applied per whole 365 days elapsed since the
///   change took effect (mid-year dates round down).
///
/// # Example
///
/// ```
/// use rse_costing::calculation::{project, BandTable};
/// use rse_costing::models::{FinancialYear, GradeChange, Rse, SalaryBand};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let band = |point, year, salary| SalaryBand {
///     grade: 1,
///     grade_point: point,
///     financial_year: FinancialYear::new(year),
///     salary: Decimal::new(salary, 0),
///     increments: true,
/// };
/// let table = BandTable::from_bands([band(1, 2017, 1000), band(2, 2018, 2001)])?;
/// let rse = Rse::new("rse_001", "Ada", NaiveDate::from_ymd_opt(2017, 8, 1).unwrap())
///     .with_grade_change(band(1, 2017, 1000));
/// let hired = GradeChange::new(band(1, 2017, 1000));
///
/// let in_year = project(&table, &rse, &hired, NaiveDate::from_ymd_opt(2018, 5, 1).unwrap())?;
/// assert_eq!(in_year.salary, Decimal::new(1000, 0));
///
/// let next_year = project(&table, &rse, &hired, NaiveDate::from_ymd_opt(2018, 9, 1).unwrap())?;
/// assert_eq!(next_year.salary, Decimal::new(2001, 0));
/// # Ok::<(), rse_costing::error::EngineError>(())
/// ```
pub fn project<T>(
    table: &T,
    rse: &Rse,
    change: &GradeChange,
    date: NaiveDate,
) -> EngineResult<SalaryBand>
where
    T: SalaryBandTable + ?Sized,
{
    let mut current = change;

    // Each pass moves to a strictly later ledger entry, so this ends within
    // the number of recorded changes.
    loop {
        let effective_from = current.effective_date();
        if date < effective_from {
            return Err(EngineError::InvalidDate {
                date,
                effective_from,
            });
        }

        if !spans_financial_year(effective_from, date) {
            return Ok(current.band.clone());
        }

        match rse
            .grade_changes
            .last_before(date)
            .filter(|newer| newer.effective_date() > effective_from)
        {
            Some(newer) => current = newer,
            None => break,
        }
    }

    let effective_from = current.effective_date();
    let increments = (date - effective_from).num_days() / DAYS_PER_INCREMENT;

    let mut band = current.band.clone();
    for _ in 0..increments {
        band = band_after_increment(table, &band)?;
    }

    debug!(
        rse_id = %rse.id,
        %date,
        from = %current.band,
        to = %band,
        increments,
        "Projected salary band"
    );

    Ok(band)
}

/// Returns the band that applies to `rse` on `date`.
///
/// Projects from the most recent grade change at or before `date`; fails with
/// `NoSalaryData` if there is none.
pub fn current_band<T>(table: &T, rse: &Rse, date: NaiveDate) -> EngineResult<SalaryBand>
where
    T: SalaryBandTable + ?Sized,
{
    let change = last_change_before(rse, date)?;
    project(table, rse, change, date)
}

/// Returns the annual salary of `rse` on `date`.
pub fn salary_at<T>(table: &T, rse: &Rse, date: NaiveDate) -> EngineResult<Decimal>
where
    T: SalaryBandTable + ?Sized,
{
    current_band(table, rse, date).map(|band| band.salary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::BandTable;
    use crate::models::FinancialYear;
    use chrono::Duration;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn band(grade: u32, grade_point: u32, year: i32, salary: &str, increments: bool) -> SalaryBand {
        SalaryBand {
            grade,
            grade_point,
            financial_year: FinancialYear::new(year),
            salary: dec(salary),
            increments,
        }
    }

    /// Grade 1 points 1-3 for 2017-2018 plus grade 2 for 2019-2020.
    fn create_test_table() -> BandTable {
        BandTable::from_bands([
            band(1, 1, 2017, "1000", true),
            band(1, 2, 2017, "2000", true),
            band(1, 3, 2017, "3000", false),
            band(1, 2, 2018, "2001", true),
            band(1, 3, 2018, "3001", false),
            band(2, 1, 2019, "5000", true),
            band(2, 2, 2019, "6000", true),
            band(2, 2, 2020, "6001", true),
        ])
        .unwrap()
    }

    fn create_test_rse(changes: &[SalaryBand]) -> Rse {
        changes.iter().cloned().fold(
            Rse::new("rse_001", "Grace", date(2017, 8, 1)),
            Rse::with_grade_change,
        )
    }

    #[test]
    fn test_same_financial_year_returns_event_band() {
        let table = create_test_table();
        let hired = band(1, 1, 2017, "1000", true);
        let rse = create_test_rse(&[hired.clone()]);

        let result = current_band(&table, &rse, date(2018, 7, 31)).unwrap();
        assert_eq!(result, hired);
    }

    #[test]
    fn test_date_before_event_is_invalid_date() {
        let table = create_test_table();
        let rse = create_test_rse(&[]);
        let change = GradeChange::new(band(1, 1, 2017, "1000", true));

        match project(&table, &rse, &change, date(2017, 7, 31)) {
            Err(EngineError::InvalidDate {
                date: d,
                effective_from,
            }) => {
                assert_eq!(d, date(2017, 7, 31));
                assert_eq!(effective_from, date(2017, 8, 1));
            }
            other => panic!("Expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_one_year_later_applies_increment() {
        let table = create_test_table();
        let rse = create_test_rse(&[band(1, 1, 2017, "1000", true)]);

        let result = current_band(&table, &rse, date(2018, 8, 1)).unwrap();
        assert_eq!(result, band(1, 2, 2018, "2001", true));
    }

    #[test]
    fn test_mid_year_rounds_down_to_completed_years() {
        let table = create_test_table();
        let rse = create_test_rse(&[band(1, 1, 2017, "1000", true)]);

        // 729 days after 2017-08-01: one completed year.
        let result = current_band(&table, &rse, date(2019, 7, 31)).unwrap();
        assert_eq!(result.grade_point, 2);
        assert_eq!(result.financial_year, FinancialYear::new(2018));
    }

    #[test]
    fn test_missing_next_year_estimates_from_latest_table() {
        let table = create_test_table();
        let rse = create_test_rse(&[band(1, 1, 2017, "1000", true)]);

        // Second increment: 1.3/2019 is unpublished, so 1.3/2018 is used.
        let result = current_band(&table, &rse, date(2019, 8, 1)).unwrap();
        assert_eq!(result, band(1, 3, 2018, "3001", false));
    }

    #[test]
    fn test_newer_real_change_takes_precedence() {
        let table = create_test_table();
        let hired = band(1, 1, 2017, "1000", true);
        let promoted = band(2, 1, 2019, "5000", true);
        let rse = create_test_rse(&[hired.clone(), promoted.clone()]);

        let result = project(&table, &rse, &GradeChange::new(hired), date(2019, 9, 1)).unwrap();
        assert_eq!(result, promoted);
    }

    #[test]
    fn test_simulates_from_newer_real_change() {
        let table = create_test_table();
        let rse = create_test_rse(&[band(1, 1, 2017, "1000", true), band(2, 1, 2019, "5000", true)]);

        let result = current_band(&table, &rse, date(2020, 8, 1)).unwrap();
        assert_eq!(result, band(2, 2, 2020, "6001", true));
    }

    #[test]
    fn test_no_change_before_date_is_no_salary_data() {
        let table = create_test_table();
        let rse = create_test_rse(&[band(1, 1, 2017, "1000", true)]);

        assert!(matches!(
            current_band(&table, &rse, date(2017, 1, 1)),
            Err(EngineError::NoSalaryData { .. })
        ));
    }

    #[test]
    fn test_data_gap_is_incomplete_salary_data() {
        let table = create_test_table();
        let rse = create_test_rse(&[band(2, 2, 2020, "6001", true)]);

        // 2.3 exists in neither 2021 nor 2020.
        assert!(matches!(
            current_band(&table, &rse, date(2021, 8, 1)),
            Err(EngineError::IncompleteSalaryData {
                grade: 2,
                grade_point: 2,
                year: 2020
            })
        ));
    }

    #[test]
    fn test_salary_at_returns_amount() {
        let table = create_test_table();
        let rse = create_test_rse(&[band(1, 1, 2017, "1000", true)]);
        assert_eq!(salary_at(&table, &rse, date(2018, 9, 1)).unwrap(), dec("2001"));
    }

    /// Grade 1 points 1-10 for 2010-2030, every band present, pay rising with
    /// both point and year. Point 10 is the ceiling.
    fn create_full_table() -> BandTable {
        let mut bands = Vec::new();
        for year in 2010..=2030 {
            for point in 1..=10u32 {
                bands.push(SalaryBand {
                    grade: 1,
                    grade_point: point,
                    financial_year: FinancialYear::new(year),
                    salary: Decimal::from(20_000 + 1_000 * point as i64 + 100 * (year as i64 - 2010)),
                    increments: point < 10,
                });
            }
        }
        BandTable::from_bands(bands).unwrap()
    }

    proptest! {
        #[test]
        fn prop_projection_is_idempotent(
            point in 1u32..=10,
            year in 2010i32..=2020,
            offset in 0i64..3650,
        ) {
            let table = create_full_table();
            let start = table.lookup(1, point, FinancialYear::new(year)).unwrap();
            let rse = create_test_rse(&[start.clone()]);
            let target = start.effective_from() + Duration::days(offset);

            let projected = current_band(&table, &rse, target).unwrap();
            prop_assume!(projected.effective_from() <= target);

            let reprojected = project(&table, &rse, &GradeChange::new(projected.clone()), target).unwrap();
            prop_assert_eq!(reprojected, projected);
        }

        #[test]
        fn prop_projection_never_reduces_pay(
            point in 1u32..=10,
            year in 2010i32..=2020,
            earlier in 0i64..3650,
            gap in 0i64..365,
        ) {
            let table = create_full_table();
            let start = table.lookup(1, point, FinancialYear::new(year)).unwrap();
            let rse = create_test_rse(&[start.clone()]);
            let change = GradeChange::new(start.clone());
            let first = start.effective_from() + Duration::days(earlier);
            let second = first + Duration::days(gap);

            let a = project(&table, &rse, &change, first).unwrap();
            let b = project(&table, &rse, &change, second).unwrap();
            prop_assert!(a.salary <= b.salary);
        }
    }
}
