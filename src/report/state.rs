//! Shared read-only records for cost reports.
//!
//! This module defines the snapshot of band and RSE data that every report
//! worker reads from.

use std::collections::HashMap;
use std::sync::Arc;

use crate::calculation::BandTable;
use crate::models::Rse;

/// A read-only snapshot of the band table and RSE records.
///
/// Cloning is cheap; all clones share the same data.
pub struct StaffRecords<T = BandTable> {
    /// The salary band table.
    table: Arc<T>,
    /// RSE records keyed by id.
    rses: Arc<HashMap<String, Rse>>,
}

impl<T> StaffRecords<T> {
    /// Creates a snapshot from a band table and RSE records.
    ///
    /// A later record with the same id replaces an earlier one.
    pub fn new(table: T, rses: impl IntoIterator<Item = Rse>) -> Self {
        let rses = rses.into_iter().map(|rse| (rse.id.clone(), rse)).collect();
        Self {
            table: Arc::new(table),
            rses: Arc::new(rses),
        }
    }

    /// Returns the band table.
    pub fn table(&self) -> &T {
        &self.table
    }

    /// Returns the RSE with the given id.
    pub fn rse(&self, id: &str) -> Option<&Rse> {
        self.rses.get(id)
    }

    /// Returns the number of RSE records.
    pub fn rse_count(&self) -> usize {
        self.rses.len()
    }
}

impl<T> Clone for StaffRecords<T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            rses: Arc::clone(&self.rses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_staff_records_is_clone_send_sync() {
        fn assert_shareable<T: Clone + Send + Sync + 'static>() {}
        assert_shareable::<StaffRecords>();
    }

    #[test]
    fn test_rse_lookup_by_id() {
        let start = NaiveDate::from_ymd_opt(2017, 8, 1).unwrap();
        let records = StaffRecords::new(
            BandTable::new(),
            [Rse::new("rse_001", "Ada", start), Rse::new("rse_002", "Alan", start)],
        );

        assert_eq!(records.rse_count(), 2);
        assert_eq!(records.rse("rse_002").unwrap().name, "Alan");
        assert!(records.rse("rse_003").is_none());
    }

    #[test]
    fn test_clones_share_data() {
        let records = StaffRecords::new(BandTable::new(), Vec::<Rse>::new());
        let clone = records.clone();
        assert!(Arc::ptr_eq(&records.rses, &clone.rses));
    }
}
