//! Test utilities and mock helpers shared by the driver's unit tests

use dp_core::{Bssid, DeltaTable, PinDeltaEntry, RawRecord, RecordSource, Result};
use mockall::mock;

mock! {
    pub Source {}

    impl RecordSource for Source {
        fn fetch_neighbours(&self, target: &Bssid) -> Result<Vec<RawRecord>>;
    }
}

/// Neighbours of C8:3A:35:D2:A5:F0: anchors at +5 and -5 and one static PIN
pub fn sample_records() -> Vec<RawRecord> {
    vec![
        RawRecord::new("C8:3A:35:D2:A5:F5", "58230145"),
        RawRecord::new("C8:3A:35:D2:A5:F2", "12345670"),
        RawRecord::new("C8:3A:35:D2:A5:EB", "41029381"),
    ]
}

pub fn sample_table() -> DeltaTable {
    DeltaTable::new(vec![(5, vec![PinDeltaEntry::new(100, 3), PinDeltaEntry::new(50, 1)])])
}
