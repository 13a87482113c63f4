//! Salary projection and staff cost engine for Research Software Engineers.
//!
//! This crate projects an RSE's salary forward from their grade-change history
//! and a table of salary bands, and integrates that salary over date ranges
//! (split at financial-year boundaries) to cost full or partial allocations.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
