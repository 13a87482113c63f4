//! Cost report aggregation.
//!
//! Costs many allocations independently on blocking tasks and merges the
//! results into a single [`CostReport`].

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{BandTable, SalaryBandTable, staff_cost};
use crate::error::{EngineError, EngineResult};
use crate::models::{Allocation, AllocationCost, CostReport, ReportWarning, Rse};

use super::state::StaffRecords;

/// The result of costing a single allocation.
#[derive(Debug)]
enum Outcome {
    /// Costed, possibly with a warning attached.
    Costed(AllocationCost, Vec<ReportWarning>),
    /// Left out of the totals.
    Omitted(ReportWarning),
    /// No days inside the reporting window.
    OutsideWindow,
}

/// Builds cost reports over a shared snapshot of staff records.
///
/// # Example
///
/// ```
/// use rse_costing::calculation::BandTable;
/// use rse_costing::models::{Allocation, FinancialYear, Rse, SalaryBand};
/// use rse_costing::report::{CostReporter, StaffRecords};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
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
/// let reporter = CostReporter::new(StaffRecords::new(table, [rse]));
///
/// let report = reporter
///     .report(
///         vec![Allocation {
///             id: "alloc_001".to_string(),
///             rse_id: "rse_001".to_string(),
///             project: "astro".to_string(),
///             start: NaiveDate::from_ymd_opt(2017, 8, 1).unwrap(),
///             end: NaiveDate::from_ymd_opt(2018, 7, 31).unwrap(),
///             percentage: Decimal::new(50, 0),
///         }],
///         None,
///     )
///     .await?;
/// assert_eq!(report.total, Decimal::new(500, 0));
/// # Ok::<(), rse_costing::error::EngineError>(())
/// # }).unwrap();
/// ```
pub struct CostReporter<T = BandTable> {
    records: StaffRecords<T>,
}

impl<T> CostReporter<T>
where
    T: SalaryBandTable + Send + Sync + 'static,
{
    /// Creates a reporter over the given records.
    pub fn new(records: StaffRecords<T>) -> Self {
        Self { records }
    }

    /// Returns the records the reporter reads from.
    pub fn records(&self) -> &StaffRecords<T> {
        &self.records
    }

    /// Costs every allocation, optionally clamped to `window`, and merges the
    /// results.
    ///
    /// Allocations are costed independently and in parallel. One that cannot be
    /// costed is reported as a warning and left out of the totals rather than
    /// failing the report. When an RSE has no salary data at the start of an
    /// allocation but does later on, the allocation is costed from the RSE's
    /// first grade change and flagged as partial.
    ///
    /// # Errors
    ///
    /// Returns `ReportTaskFailed` if a worker task panics or is cancelled.
    pub async fn report(
        &self,
        allocations: Vec<Allocation>,
        window: Option<(NaiveDate, NaiveDate)>,
    ) -> EngineResult<CostReport> {
        let report_id = Uuid::new_v4();
        let start_time = Instant::now();
        let count = allocations.len();
        info!(report_id = %report_id, allocations = count, "Building cost report");

        let mut tasks = JoinSet::new();
        for (index, allocation) in allocations.into_iter().enumerate() {
            let records = self.records.clone();
            tasks.spawn_blocking(move || (index, cost_allocation(&records, &allocation, window)));
        }

        let mut outcomes = Vec::with_capacity(count);
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.map_err(|err| EngineError::ReportTaskFailed {
                message: err.to_string(),
            })?;
            outcomes.push(outcome);
        }
        outcomes.sort_by_key(|(index, _)| *index);

        let mut lines = Vec::new();
        let mut warnings = Vec::new();
        let mut project_totals: BTreeMap<String, Decimal> = BTreeMap::new();

        for (_, outcome) in outcomes {
            match outcome {
                Outcome::Costed(line, line_warnings) => {
                    *project_totals.entry(line.project.clone()).or_default() += line.cost;
                    warnings.extend(line_warnings);
                    lines.push(line);
                }
                Outcome::Omitted(warning) => {
                    warn!(
                        report_id = %report_id,
                        allocation_id = %warning.allocation_id,
                        code = %warning.code,
                        "Allocation omitted from cost report"
                    );
                    warnings.push(warning);
                }
                Outcome::OutsideWindow => {}
            }
        }

        let total: Decimal = lines.iter().map(|line| line.cost).sum();
        let duration_us = start_time.elapsed().as_micros() as u64;

        info!(
            report_id = %report_id,
            lines = lines.len(),
            warnings = warnings.len(),
            total = %total,
            duration_us,
            "Cost report completed"
        );

        Ok(CostReport {
            report_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            window,
            lines,
            project_totals,
            total,
            warnings,
            duration_us,
        })
    }
}

/// Costs one allocation against the shared records.
fn cost_allocation<T>(
    records: &StaffRecords<T>,
    allocation: &Allocation,
    window: Option<(NaiveDate, NaiveDate)>,
) -> Outcome
where
    T: SalaryBandTable,
{
    let Some(rse) = records.rse(&allocation.rse_id) else {
        return Outcome::Omitted(ReportWarning::unknown_rse(&allocation.id, &allocation.rse_id));
    };

    if let Err(err) = allocation.validate() {
        return Outcome::Omitted(ReportWarning::from_error(&allocation.id, &err));
    }

    let Some((from, until)) = allocation.overlap(window) else {
        return Outcome::OutsideWindow;
    };

    let mut warnings = Vec::new();
    if !rse.employed_in_period(from, until) {
        warnings.push(ReportWarning::outside_employment(&allocation.id, &rse.id));
    }

    let table = records.table();
    match staff_cost(table, rse, from, until, allocation.percentage) {
        Ok(cost) => Outcome::Costed(line(allocation, from, until, cost, false), warnings),
        Err(err @ EngineError::NoSalaryData { .. }) => match starts_later(rse, from, until) {
            Some(costed_from) => {
                match staff_cost(table, rse, costed_from, until, allocation.percentage) {
                    Ok(cost) => {
                        warnings.push(ReportWarning::partial_period(
                            &allocation.id,
                            from,
                            costed_from,
                        ));
                        Outcome::Costed(line(allocation, costed_from, until, cost, true), warnings)
                    }
                    Err(err) => Outcome::Omitted(ReportWarning::from_error(&allocation.id, &err)),
                }
            }
            None => Outcome::Omitted(ReportWarning::from_error(&allocation.id, &err)),
        },
        Err(err) => Outcome::Omitted(ReportWarning::from_error(&allocation.id, &err)),
    }
}

/// Returns the RSE's first grade-change date if it falls inside `(from, until]`.
fn starts_later(rse: &Rse, from: NaiveDate, until: NaiveDate) -> Option<NaiveDate> {
    rse.first_change_date()
        .filter(|&first| first > from && first <= until)
}

fn line(
    allocation: &Allocation,
    from: NaiveDate,
    until: NaiveDate,
    cost: Decimal,
    partial: bool,
) -> AllocationCost {
    AllocationCost {
        allocation_id: allocation.id.clone(),
        rse_id: allocation.rse_id.clone(),
        project: allocation.project.clone(),
        from,
        until,
        percentage: allocation.percentage,
        cost,
        partial,
    }
}
