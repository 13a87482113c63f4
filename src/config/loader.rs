//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading salary scales
//! from YAML files.

use std::fs;
use std::path::Path;

use crate::calculation::{BandTable, SalaryBandTable};
use crate::error::{EngineError, EngineResult};
use crate::models::{FinancialYear, SalaryBand};

use super::types::{BandFile, SalaryScale, ScaleMetadata};

/// Loads and provides access to a salary scale.
///
/// # Directory Structure
///
/// ```text
/// config/uos-grades/
/// ├── scale.yaml        # Scale metadata
/// └── bands/
///     ├── 2017.yaml     # Bands for the 2017/18 financial year
///     └── 2018.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use rse_costing::config::ConfigLoader;
/// use rse_costing::models::FinancialYear;
///
/// let loader = ConfigLoader::load("./config/uos-grades")?;
/// let band = loader.lookup(7, 1, FinancialYear::new(2017))?;
/// println!("Grade 7.1 in {}: {}", band.financial_year, band.salary);
/// # Ok::<(), rse_costing::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    scale: SalaryScale,
}

impl ConfigLoader {
    /// Loads a salary scale from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `scale.yaml` or the `bands/` directory is missing, or `bands/` is empty
    /// - any file contains invalid YAML
    /// - a band file named after a year declares a different year
    /// - the same (grade, grade point, year) appears twice
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ScaleMetadata>(&path.join("scale.yaml"))?;
        let table = Self::load_bands(&path.join("bands"))?;

        tracing::debug!(
            scale = %metadata.name,
            bands = table.len(),
            years = table.years().len(),
            "Loaded salary scale"
        );

        Ok(Self {
            scale: SalaryScale::new(metadata, table),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every band file from the bands directory into one table.
    fn load_bands(bands_dir: &Path) -> EngineResult<BandTable> {
        let bands_dir_str = bands_dir.display().to_string();

        let entries = fs::read_dir(bands_dir).map_err(|_| EngineError::ConfigNotFound {
            path: bands_dir_str.clone(),
        })?;

        let mut table = BandTable::new();
        let mut files = 0;

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: bands_dir_str.clone(),
            })?;

            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "yaml") {
                continue;
            }

            let band_file = Self::load_yaml::<BandFile>(&path)?;
            let named_year = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<i32>().ok())
                .filter(|&year| year != band_file.financial_year.year());
            if let Some(named_year) = named_year {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!(
                        "file is named for {} but declares financial year {}",
                        named_year,
                        band_file.financial_year.year()
                    ),
                });
            }

            for band in band_file.into_bands() {
                table.insert(band)?;
            }
            files += 1;
        }

        if files == 0 {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no band files found)", bands_dir_str),
            });
        }

        Ok(table)
    }

    /// Returns the loaded salary scale.
    pub fn scale(&self) -> &SalaryScale {
        &self.scale
    }

    /// Returns the scale metadata.
    pub fn metadata(&self) -> &ScaleMetadata {
        self.scale.metadata()
    }

    /// Returns the band table.
    pub fn band_table(&self) -> &BandTable {
        self.scale.table()
    }

    /// Looks up a band by its exact key.
    pub fn lookup(
        &self,
        grade: u32,
        grade_point: u32,
        year: FinancialYear,
    ) -> EngineResult<SalaryBand> {
        self.band_table().lookup(grade, grade_point, year)
    }

    /// Returns every band of `year`, ordered by grade then grade point.
    pub fn bands_for_year(&self, year: FinancialYear) -> Vec<SalaryBand> {
        self.band_table().bands_for_year(year)
    }
}
