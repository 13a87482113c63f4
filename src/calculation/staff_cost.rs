//! Staff cost integration.
//!
//! Integrates an RSE's (possibly changing) salary over a date range. The range
//! is partitioned at financial-year boundaries and each partition is charged
//! at the band that applies on its first day.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{Allocation, CostBreakdown, CostPeriod, Rse, SalaryBand};

use super::band_table::SalaryBandTable;
use super::financial_calendar::{next_boundary_after, spans_financial_year};
use super::salary_projection::current_band;

/// Days per year used to turn annual salaries into daily rates.
///
/// Leap years are not special-cased.
pub const DAYS_PER_YEAR: Decimal = Decimal::from_parts(365, 0, 0, false, 0);

/// Returns the daily cost of an annual salary at the given percentage.
///
/// # Example
///
/// ```
/// use rse_costing::calculation::daily_rate;
/// use rust_decimal::Decimal;
///
/// let rate = daily_rate(Decimal::new(36500, 0), Decimal::new(50, 0));
/// assert_eq!(rate, Decimal::new(50, 0));
/// ```
pub fn daily_rate(annual_salary: Decimal, percentage: Decimal) -> Decimal {
    annual_salary / DAYS_PER_YEAR * (percentage / Decimal::ONE_HUNDRED)
}

/// Cost of `days` days at `daily_rate(annual_salary, percentage)`.
///
/// Multiplies before dividing so whole years come out exact.
fn period_cost(annual_salary: Decimal, percentage: Decimal, days: i64) -> Decimal {
    annual_salary * percentage / Decimal::ONE_HUNDRED * Decimal::from(days) / DAYS_PER_YEAR
}

/// Charges `[from, until_exclusive)` at `band`.
fn charge(band: SalaryBand, from: NaiveDate, until_exclusive: NaiveDate, percentage: Decimal) -> CostPeriod {
    let days = (until_exclusive - from).num_days();
    CostPeriod {
        from,
        until: until_exclusive - Duration::days(1),
        daily_rate: daily_rate(band.salary, percentage),
        amount: period_cost(band.salary, percentage, days),
        days,
        band,
    }
}

/// Costs `percentage` of `rse`'s time from `start` to `end` inclusive,
/// returning each financial-year partition.
///
/// # Behavior
///
/// - While the remaining range crosses a financial-year boundary, the band at
///   the cursor is charged up to the end of that band's financial year.
/// - The last partition runs to `end` at the band in force on its first day.
/// - Partitions never run past `end` and the cursor always moves forward, also
///   on the July 31st left over by a 364-day year containing February 29th.
/// - When the band in force belongs to an older financial year (a ceiling
///   band carried forward for lack of data) the partition runs to the next
///   financial-year boundary.
///
/// Lookup failures (`NoSalaryData`, `IncompleteSalaryData`) abort the whole
/// computation; nothing is accumulated partially.
///
/// # Errors
///
/// Returns `InvalidDateRange` if `end` is before `start`.
pub fn staff_cost_breakdown<T>(
    table: &T,
    rse: &Rse,
    start: NaiveDate,
    end: NaiveDate,
    percentage: Decimal,
) -> EngineResult<CostBreakdown>
where
    T: SalaryBandTable + ?Sized,
{
    if end < start {
        return Err(EngineError::InvalidDateRange { start, end });
    }

    let end_exclusive = end + Duration::days(1);
    let mut cursor = start;
    let mut periods = Vec::new();

    while cursor < end_exclusive && spans_financial_year(cursor, end_exclusive) {
        let band = current_band(table, rse, cursor)?;

        let mut period_end = band.financial_year.end_date() + Duration::days(1);
        if period_end <= cursor {
            period_end = next_boundary_after(cursor);
        }
        let period_end = period_end.min(end_exclusive);

        let period = charge(band, cursor, period_end, percentage);
        debug!(
            rse_id = %rse.id,
            from = %period.from,
            until = %period.until,
            band = %period.band,
            days = period.days,
            amount = %period.amount,
            "Charged financial year period"
        );
        periods.push(period);
        cursor = period_end;
    }

    if cursor < end_exclusive {
        let band = current_band(table, rse, cursor)?;
        let period = charge(band, cursor, end_exclusive, percentage);
        debug!(
            rse_id = %rse.id,
            from = %period.from,
            until = %period.until,
            band = %period.band,
            days = period.days,
            amount = %period.amount,
            "Charged final period"
        );
        periods.push(period);
    }

    let total: Decimal = periods.iter().map(|p| p.amount).sum();

    Ok(CostBreakdown {
        rse_id: rse.id.clone(),
        start,
        end,
        percentage,
        periods,
        total,
    })
}

/// Costs `percentage` of `rse`'s time from `start` to `end` inclusive.
///
/// The total of [`staff_cost_breakdown`].
///
/// # Example
///
/// ```
/// use rse_costing::calculation::{staff_cost, BandTable};
/// use rse_costing::models::{FinancialYear, Rse, SalaryBand};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let hired = SalaryBand {
///     grade: 1,
///     grade_point: 1,
///     financial_year: FinancialYear::new(2017),
///     salary: Decimal::new(1000, 0),
///     increments: true,
/// };
/// let table = BandTable::from_bands([hired.clone()])?;
/// let rse = Rse::new("rse_001", "Ada", NaiveDate::from_ymd_opt(2017, 8, 1).unwrap())
///     .with_grade_change(hired);
///
/// let cost = staff_cost(
///     &table,
///     &rse,
///     NaiveDate::from_ymd_opt(2017, 8, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2018, 7, 31).unwrap(),
///     Decimal::new(50, 0),
/// )?;
/// assert_eq!(cost, Decimal::new(500, 0));
/// # Ok::<(), rse_costing::error::EngineError>(())
/// ```
pub fn staff_cost<T>(
    table: &T,
    rse: &Rse,
    start: NaiveDate,
    end: NaiveDate,
    percentage: Decimal,
) -> EngineResult<Decimal>
where
    T: SalaryBandTable + ?Sized,
{
    staff_cost_breakdown(table, rse, start, end, percentage).map(|breakdown| breakdown.total)
}

/// Costs an allocation, optionally restricted to a reporting window.
///
/// An allocation with no days inside the window costs zero.
///
/// # Errors
///
/// Returns `InvalidAllocation` if the allocation fails validation or belongs
/// to a different RSE, and propagates lookup failures from [`staff_cost`].
pub fn allocation_cost<T>(
    table: &T,
    rse: &Rse,
    allocation: &Allocation,
    window: Option<(NaiveDate, NaiveDate)>,
) -> EngineResult<Decimal>
where
    T: SalaryBandTable + ?Sized,
{
    allocation.validate()?;
    if allocation.rse_id != rse.id {
        return Err(EngineError::InvalidAllocation {
            allocation_id: allocation.id.clone(),
            message: format!(
                "belongs to RSE '{}', not '{}'",
                allocation.rse_id, rse.id
            ),
        });
    }

    match allocation.overlap(window) {
        Some((from, until)) => staff_cost(table, rse, from, until, allocation.percentage),
        None => Ok(Decimal::ZERO),
    }
}
