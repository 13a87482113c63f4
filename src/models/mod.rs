//! Core data models for the RSE costing engine.
//!
//! This module contains the records the engine consumes (RSEs, salary bands,
//! allocations) and the cost results it produces.

mod allocation;
mod cost_breakdown;
mod financial_year;
mod rse;
mod salary_band;

pub use allocation::Allocation;
pub use cost_breakdown::{AllocationCost, CostBreakdown, CostPeriod, CostReport, ReportWarning};
pub use financial_year::FinancialYear;
pub use rse::Rse;
pub use salary_band::{BandKey, GradeChange, SalaryBand};
