//! Remote record source seam
//!
//! The engine never talks to the network itself. A [`RecordSource`] returns
//! the database records that share the target's search mask.

use crate::address::Bssid;
use crate::data::RawRecord;
use crate::error::Result;

/// Provider of neighbouring access-point records for a target address
#[cfg_attr(test, mockall::automock)]
pub trait RecordSource {
    /// Records whose BSSID falls under the target's search mask
    fn fetch_neighbours(&self, target: &Bssid) -> Result<Vec<RawRecord>>;
}

/// In-memory record source, mostly useful for offline runs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticRecords {
    records: Vec<RawRecord>,
}

impl StaticRecords {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

impl RecordSource for StaticRecords {
    fn fetch_neighbours(&self, target: &Bssid) -> Result<Vec<RawRecord>> {
        let mask = target.search_mask();
        let prefix = mask.trim_end_matches('*');
        Ok(self
            .records
            .iter()
            .filter(|r| r.bssid.to_ascii_uppercase().starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_records_filter_by_mask() {
        let source = StaticRecords::new(vec![
            RawRecord::new("C8:3A:35:D2:A5:01", "12345670"),
            RawRecord::new("c8:3a:35:d2:a5:ff", "12345670"),
            RawRecord::new("C8:3A:35:D2:B5:01", "12345670"),
        ]);
        let target: Bssid = "C8:3A:35:D2:A5:F0".parse().unwrap();
        let found = source.fetch_neighbours(&target).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_mock_source() {
        let mut source = MockRecordSource::new();
        source
            .expect_fetch_neighbours()
            .times(1)
            .returning(|_| Ok(vec![RawRecord::new("00:11:22:33:44:55", "12345670")]));
        let target: Bssid = "00:11:22:33:44:50".parse().unwrap();
        assert_eq!(source.fetch_neighbours(&target).unwrap().len(), 1);
    }
}
