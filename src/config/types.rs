//! Configuration types for salary scales.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML files of a salary scale directory.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::BandTable;
use crate::models::{FinancialYear, SalaryBand};

/// Metadata about the salary scale.
#[derive(Debug, Clone, Deserialize)]
pub struct ScaleMetadata {
    /// The human-readable name of the scale.
    pub name: String,
    /// The institution publishing the scale.
    pub institution: String,
    /// ISO currency code the salaries are expressed in.
    pub currency: String,
    /// Where the figures were taken from.
    #[serde(default)]
    pub source: Option<String>,
}

/// One band entry within a year's band file.
#[derive(Debug, Clone, Deserialize)]
pub struct BandEntry {
    /// The grade.
    pub grade: u32,
    /// The point within the grade.
    pub grade_point: u32,
    /// The annual salary.
    pub salary: Decimal,
    /// Whether the point advances each year. Defaults to true.
    #[serde(default = "default_increments")]
    pub increments: bool,
}

fn default_increments() -> bool {
    true
}

/// A band file: every band published for one financial year.
#[derive(Debug, Clone, Deserialize)]
pub struct BandFile {
    /// The financial year the bands apply to.
    pub financial_year: FinancialYear,
    /// The bands.
    pub bands: Vec<BandEntry>,
}

impl BandFile {
    /// Converts the entries into salary bands for this file's year.
    pub fn into_bands(self) -> impl Iterator<Item = SalaryBand> {
        let financial_year = self.financial_year;
        self.bands.into_iter().map(move |entry| SalaryBand {
            grade: entry.grade,
            grade_point: entry.grade_point,
            financial_year,
            salary: entry.salary,
            increments: entry.increments,
        })
    }
}

/// A complete salary scale loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct SalaryScale {
    metadata: ScaleMetadata,
    table: BandTable,
}

impl SalaryScale {
    /// Creates a salary scale from its metadata and band table.
    pub fn new(metadata: ScaleMetadata, table: BandTable) -> Self {
        Self { metadata, table }
    }

    /// Returns the scale metadata.
    pub fn metadata(&self) -> &ScaleMetadata {
        &self.metadata
    }

    /// Returns the band table.
    pub fn table(&self) -> &BandTable {
        &self.table
    }

    /// Consumes the scale, returning its band table.
    pub fn into_table(self) -> BandTable {
        self.table
    }
}
