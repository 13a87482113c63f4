//! Cost reports over many allocations.
//!
//! A [`CostReporter`] costs a batch of allocations against a shared
//! [`StaffRecords`] snapshot and produces a [`CostReport`](crate::models::CostReport)
//! with per-project totals and warnings for anything it could not cost.

mod aggregate;
mod state;
mod warnings;

pub use aggregate::CostReporter;
pub use state::StaffRecords;
pub use warnings::{SEVERITY_HIGH, SEVERITY_MEDIUM};
