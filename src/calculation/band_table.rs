//! Salary band table lookups and increment resolution.
//!
//! The engine reads bands through the [`SalaryBandTable`] trait so that the
//! record store owning them can be swapped in. [`BandTable`] is the in-memory
//! implementation used by the configuration loader and the tests.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{BandKey, FinancialYear, SalaryBand};

/// Read access to salary bands keyed by (grade, grade point, financial year).
pub trait SalaryBandTable {
    /// Returns the band for the exact key, if one exists.
    fn band(&self, grade: u32, grade_point: u32, year: FinancialYear) -> Option<SalaryBand>;

    /// Returns every band of `year`, ordered by grade then grade point.
    ///
    /// Used for administrative display; the costing engine does not need it.
    fn bands_for_year(&self, year: FinancialYear) -> Vec<SalaryBand>;

    /// Returns the band for the exact key, or `BandNotFound`.
    fn lookup(&self, grade: u32, grade_point: u32, year: FinancialYear) -> EngineResult<SalaryBand> {
        self.band(grade, grade_point, year)
            .ok_or(EngineError::BandNotFound {
                grade,
                grade_point,
                year: year.year(),
            })
    }
}

impl<T: SalaryBandTable + ?Sized> SalaryBandTable for &T {
    fn band(&self, grade: u32, grade_point: u32, year: FinancialYear) -> Option<SalaryBand> {
        (**self).band(grade, grade_point, year)
    }

    fn bands_for_year(&self, year: FinancialYear) -> Vec<SalaryBand> {
        (**self).bands_for_year(year)
    }
}

/// An in-memory salary band table.
///
/// Enforces at most one band per (grade, grade point, financial year).
///
/// # Example
///
/// ```
/// use rse_costing::calculation::{BandTable, SalaryBandTable};
/// use rse_costing::models::{FinancialYear, SalaryBand};
/// use rust_decimal::Decimal;
///
/// let mut table = BandTable::new();
/// table.insert(SalaryBand {
///     grade: 1,
///     grade_point: 1,
///     financial_year: FinancialYear::new(2017),
///     salary: Decimal::new(1000, 0),
///     increments: true,
/// })?;
///
/// let band = table.lookup(1, 1, FinancialYear::new(2017))?;
/// assert_eq!(band.salary, Decimal::new(1000, 0));
/// assert!(table.lookup(1, 2, FinancialYear::new(2017)).is_err());
/// # Ok::<(), rse_costing::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandTable {
    bands: BTreeMap<BandKey, SalaryBand>,
}

impl BandTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from bands, rejecting duplicate keys.
    pub fn from_bands<I>(bands: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = SalaryBand>,
    {
        let mut table = Self::new();
        for band in bands {
            table.insert(band)?;
        }
        Ok(table)
    }

    /// Adds a band, failing with `DuplicateBand` if its key is already present.
    pub fn insert(&mut self, band: SalaryBand) -> EngineResult<()> {
        let key = band.key();
        if self.bands.contains_key(&key) {
            return Err(EngineError::DuplicateBand {
                grade: key.grade,
                grade_point: key.grade_point,
                year: key.financial_year.year(),
            });
        }
        self.bands.insert(key, band);
        Ok(())
    }

    /// Returns the financial years that have at least one band, oldest first.
    pub fn years(&self) -> Vec<FinancialYear> {
        let mut years: Vec<FinancialYear> =
            self.bands.keys().map(|key| key.financial_year).collect();
        years.dedup();
        years
    }

    /// Returns the number of bands.
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Returns true if the table holds no bands.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

impl SalaryBandTable for BandTable {
    fn band(&self, grade: u32, grade_point: u32, year: FinancialYear) -> Option<SalaryBand> {
        self.bands
            .get(&BandKey::new(grade, grade_point, year))
            .cloned()
    }

    fn bands_for_year(&self, year: FinancialYear) -> Vec<SalaryBand> {
        let first = BandKey::new(0, 0, year);
        let last = BandKey::new(u32::MAX, u32::MAX, year);
        self.bands.range(first..=last).map(|(_, band)| band.clone()).collect()
    }
}

/// Returns the band an RSE moves onto one financial year after `band`.
///
/// The target grade point is `grade_point + 1` for incrementing bands and
/// unchanged otherwise; the target year is the following financial year.
/// When that year has not been published yet:
/// - a non-incrementing band is returned unchanged;
/// - an incrementing band moves up a point within its own year's table, as an
///   estimate of the unpublished rate.
///
/// Fails with `IncompleteSalaryData` if the estimate cannot be made either.
///
/// # Example
///
/// ```
/// use rse_costing::calculation::{band_after_increment, BandTable};
/// use rse_costing::models::{FinancialYear, SalaryBand};
/// use rust_decimal::Decimal;
///
/// let band = |point, year, salary| SalaryBand {
///     grade: 1,
///     grade_point: point,
///     financial_year: FinancialYear::new(year),
///     salary: Decimal::new(salary, 0),
///     increments: true,
/// };
/// let table = BandTable::from_bands([
///     band(1, 2017, 1000),
///     band(2, 2017, 2000),
///     band(2, 2018, 2001),
/// ])?;
///
/// let next = band_after_increment(&table, &band(1, 2017, 1000))?;
/// assert_eq!(next, band(2, 2018, 2001));
/// # Ok::<(), rse_costing::error::EngineError>(())
/// ```
pub fn band_after_increment<T>(table: &T, band: &SalaryBand) -> EngineResult<SalaryBand>
where
    T: SalaryBandTable + ?Sized,
{
    let target_point = if band.increments {
        band.grade_point + 1
    } else {
        band.grade_point
    };
    let target_year = band.financial_year.next();

    if let Some(next) = table.band(band.grade, target_point, target_year) {
        return Ok(next);
    }

    if !band.increments {
        debug!(
            grade = band.grade,
            grade_point = band.grade_point,
            year = %band.financial_year,
            "No data for following year; keeping ceiling band"
        );
        return Ok(band.clone());
    }

    debug!(
        grade = band.grade,
        grade_point = target_point,
        year = %band.financial_year,
        "No data for following year; estimating increment from current year"
    );
    table
        .band(band.grade, target_point, band.financial_year)
        .ok_or(EngineError::IncompleteSalaryData {
            grade: band.grade,
            grade_point: band.grade_point,
            year: band.financial_year.year(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn band(grade_point: u32, year: i32, salary: &str, increments: bool) -> SalaryBand {
        SalaryBand {
            grade: 1,
            grade_point,
            financial_year: FinancialYear::new(year),
            salary: dec(salary),
            increments,
        }
    }

    /// Two years of grade 1: points 1-3 increment, point 4 is the ceiling.
    fn create_test_table() -> BandTable {
        BandTable::from_bands([
            band(1, 2017, "1000", true),
            band(2, 2017, "2000", true),
            band(3, 2017, "3000", true),
            band(4, 2017, "4000", false),
            band(2, 2018, "2001", true),
            band(3, 2018, "3001", true),
            band(4, 2018, "4001", false),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_exact_match() {
        let table = create_test_table();
        let found = table.lookup(1, 3, FinancialYear::new(2018)).unwrap();
        assert_eq!(found.salary, dec("3001"));
    }

    #[test]
    fn test_lookup_missing_returns_band_not_found() {
        let table = create_test_table();
        match table.lookup(1, 1, FinancialYear::new(2018)) {
            Err(EngineError::BandNotFound {
                grade,
                grade_point,
                year,
            }) => {
                assert_eq!((grade, grade_point, year), (1, 1, 2018));
            }
            other => panic!("Expected BandNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let mut table = create_test_table();
        let result = table.insert(band(2, 2017, "9999", true));
        assert!(matches!(
            result,
            Err(EngineError::DuplicateBand {
                grade: 1,
                grade_point: 2,
                year: 2017
            })
        ));
        assert_eq!(table.lookup(1, 2, FinancialYear::new(2017)).unwrap().salary, dec("2000"));
    }

    #[test]
    fn test_bands_for_year_ordered_and_filtered() {
        let mut table = create_test_table();
        table
            .insert(SalaryBand {
                grade: 2,
                grade_point: 1,
                financial_year: FinancialYear::new(2017),
                salary: dec("5000"),
                increments: true,
            })
            .unwrap();

        let bands = table.bands_for_year(FinancialYear::new(2017));
        let keys: Vec<(u32, u32)> = bands.iter().map(|b| (b.grade, b.grade_point)).collect();
        assert_eq!(keys, vec![(1, 1), (1, 2), (1, 3), (1, 4), (2, 1)]);
        assert!(table.bands_for_year(FinancialYear::new(2020)).is_empty());
    }

    #[test]
    fn test_years_are_distinct_and_sorted() {
        let table = create_test_table();
        assert_eq!(
            table.years(),
            vec![FinancialYear::new(2017), FinancialYear::new(2018)]
        );
        assert_eq!(table.len(), 7);
    }

    #[test]
    fn test_increment_moves_to_next_point_next_year() {
        let table = create_test_table();
        let next = band_after_increment(&table, &band(1, 2017, "1000", true)).unwrap();
        assert_eq!(next, band(2, 2018, "2001", true));
    }

    #[test]
    fn test_ceiling_band_takes_next_year_rate() {
        let table = create_test_table();
        let next = band_after_increment(&table, &band(4, 2017, "4000", false)).unwrap();
        assert_eq!(next, band(4, 2018, "4001", false));
    }

    #[test]
    fn test_ceiling_band_without_next_year_is_unchanged() {
        let table = create_test_table();
        let ceiling = band(4, 2018, "4001", false);
        let next = band_after_increment(&table, &ceiling).unwrap();
        assert_eq!(next, ceiling);
    }

    #[test]
    fn test_increment_without_next_year_uses_current_year_table() {
        let table = create_test_table();
        let next = band_after_increment(&table, &band(2, 2018, "2001", true)).unwrap();
        assert_eq!(next, band(3, 2018, "3001", true));
    }

    #[test]
    fn test_increment_with_no_data_at_all_is_incomplete() {
        let table = create_test_table();
        // Neither 1.5/2019 nor 1.5/2018 exists.
        let orphan = SalaryBand {
            grade: 1,
            grade_point: 4,
            financial_year: FinancialYear::new(2018),
            salary: dec("4001"),
            increments: true,
        };
        match band_after_increment(&table, &orphan) {
            Err(EngineError::IncompleteSalaryData {
                grade,
                grade_point,
                year,
            }) => assert_eq!((grade, grade_point, year), (1, 4, 2018)),
            other => panic!("Expected IncompleteSalaryData, got {:?}", other),
        }
    }

    #[test]
    fn test_table_usable_through_reference() {
        let table = create_test_table();
        let by_ref: &dyn SalaryBandTable = &table;
        assert!(by_ref.band(1, 1, FinancialYear::new(2017)).is_some());
    }
}
