//! Calculation logic for the RSE costing engine.
//!
//! This module contains the financial calendar, salary band lookups and
//! increment resolution, the grade-change ledger, salary projection, and the
//! cost integration that splits date ranges at financial-year boundaries.

mod band_table;
mod financial_calendar;
mod grade_ledger;
mod salary_projection;
mod staff_cost;

pub use band_table::{BandTable, SalaryBandTable, band_after_increment};
pub use financial_calendar::{
    FINANCIAL_YEAR_LENGTH_DAYS, FINANCIAL_YEAR_START_MONTH, end_of, financial_year_of,
    next_boundary_after, spans_financial_year, start_of,
};
pub use grade_ledger::{GradeLedger, last_change_before};
pub use salary_projection::{current_band, project, salary_at};
pub use staff_cost::{
    DAYS_PER_YEAR, allocation_cost, daily_rate, staff_cost, staff_cost_breakdown,
};
