//! Cost result models.
//!
//! This module contains the [`CostBreakdown`] produced by the cost integration
//! engine for a single RSE and date range, and the [`CostReport`] that merges
//! many allocation costs together.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SalaryBand;

/// One partition of a costed range, charged at a single salary band.
///
/// # Example
///
/// ```
/// use rse_costing::models::{CostPeriod, FinancialYear, SalaryBand};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = CostPeriod {
///     from: NaiveDate::from_ymd_opt(2017, 8, 1).unwrap(),
///     until: NaiveDate::from_ymd_opt(2018, 7, 31).unwrap(),
///     band: SalaryBand {
///         grade: 1,
///         grade_point: 1,
///         financial_year: FinancialYear::new(2017),
///         salary: Decimal::new(1000, 0),
///         increments: true,
///     },
///     daily_rate: Decimal::new(1000, 0) / Decimal::new(365, 0),
///     days: 365,
///     amount: Decimal::new(1000, 0),
/// };
/// assert_eq!(period.days, 365);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostPeriod {
    /// First day of the period.
    pub from: NaiveDate,
    /// Last day of the period (inclusive).
    pub until: NaiveDate,
    /// The band the period is charged at.
    pub band: SalaryBand,
    /// Cost per day at the allocated percentage.
    pub daily_rate: Decimal,
    /// Number of days charged.
    pub days: i64,
    /// Cost of the period.
    pub amount: Decimal,
}

/// The full result of costing an RSE over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// The RSE that was costed.
    pub rse_id: String,
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range (inclusive).
    pub end: NaiveDate,
    /// Percentage of time charged.
    pub percentage: Decimal,
    /// Partitions in chronological order.
    pub periods: Vec<CostPeriod>,
    /// Sum of all period amounts.
    pub total: Decimal,
}

impl CostBreakdown {
    /// Returns the number of days charged across all periods.
    pub fn days(&self) -> i64 {
        self.periods.iter().map(|p| p.days).sum()
    }
}

/// The cost of one allocation within a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationCost {
    /// The allocation that was costed.
    pub allocation_id: String,
    /// The RSE allocated.
    pub rse_id: String,
    /// The project charged.
    pub project: String,
    /// First day actually costed.
    pub from: NaiveDate,
    /// Last day actually costed (inclusive).
    pub until: NaiveDate,
    /// Percentage of time charged.
    pub percentage: Decimal,
    /// Cost of the allocation over `from..=until`.
    pub cost: Decimal,
    /// True when costing had to start later than requested for lack of salary data.
    pub partial: bool,
}

/// A warning raised while building a report.
///
/// Warnings mark allocations that could not be (fully) costed. They do not
/// stop the rest of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The allocation the warning concerns.
    pub allocation_id: String,
    /// The severity level ("medium" for partial costs, "high" for omitted ones).
    pub severity: String,
}

/// Aggregated staff costs over many allocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was produced.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// The reporting window, if allocations were clamped to one.
    pub window: Option<(NaiveDate, NaiveDate)>,
    /// Costed allocations, in the order they were supplied.
    pub lines: Vec<AllocationCost>,
    /// Total cost per project.
    pub project_totals: BTreeMap<String, Decimal>,
    /// Grand total across all lines.
    pub total: Decimal,
    /// Allocations that were omitted or only partially costed.
    pub warnings: Vec<ReportWarning>,
    /// Time taken to build the report in microseconds.
    pub duration_us: u64,
}

impl CostReport {
    /// Serializes the report to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FinancialYear;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_sample_period(days: i64, amount: &str) -> CostPeriod {
        CostPeriod {
            from: date(2017, 8, 1),
            until: date(2017, 8, 1) + chrono::Duration::days(days - 1),
            band: SalaryBand {
                grade: 1,
                grade_point: 1,
                financial_year: FinancialYear::new(2017),
                salary: dec("1000"),
                increments: true,
            },
            daily_rate: dec("1.37"),
            days,
            amount: dec(amount),
        }
    }

    #[test]
    fn test_breakdown_days_sums_periods() {
        let breakdown = CostBreakdown {
            rse_id: "rse_001".to_string(),
            start: date(2017, 8, 1),
            end: date(2018, 9, 30),
            percentage: dec("50"),
            periods: vec![create_sample_period(365, "500"), create_sample_period(61, "170.5")],
            total: dec("670.5"),
        };
        assert_eq!(breakdown.days(), 426);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut project_totals = BTreeMap::new();
        project_totals.insert("astro".to_string(), dec("500"));

        let report = CostReport {
            report_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            window: None,
            lines: vec![AllocationCost {
                allocation_id: "alloc_001".to_string(),
                rse_id: "rse_001".to_string(),
                project: "astro".to_string(),
                from: date(2017, 8, 1),
                until: date(2018, 7, 31),
                percentage: dec("50"),
                cost: dec("500"),
                partial: false,
            }],
            project_totals,
            total: dec("500"),
            warnings: vec![],
            duration_us: 42,
        };

        let json = report.to_json().unwrap();
        assert!(json.contains("\"astro\": \"500\""));
        assert!(json.contains("\"allocation_id\": \"alloc_001\""));

        let deserialized: CostReport = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, report);
    }
}
