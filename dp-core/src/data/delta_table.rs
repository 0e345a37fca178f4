//! DeltaMAC → DeltaPIN frequency table
//!
//! The table is built once from a JSON reference file and never mutated. Its
//! serialized form maps decimal string keys (absolute address deltas) to
//! arrays of `{"count": n, "deltapin": d}` objects:
//!
//! ```json
//! { "1": [{"count": 12, "deltapin": 3}], "5": [{"count": 3, "deltapin": 100}] }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::data::types::PinDeltaEntry;
use crate::error::{DeltaPinError, Result};

/// Immutable address-delta → PIN-delta distribution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaTable {
    entries: BTreeMap<u64, Vec<PinDeltaEntry>>,
}

impl DeltaTable {
    /// Build a table, ordering every entry list by descending count
    ///
    /// Entries with equal counts keep their input order.
    pub fn new(entries: impl IntoIterator<Item = (u64, Vec<PinDeltaEntry>)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(key, mut list)| {
                list.sort_by(|a, b| b.count.cmp(&a.count));
                (key, list)
            })
            .collect();
        Self { entries }
    }

    /// Parse the JSON serialized form
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<PinDeltaEntry>> = serde_json::from_str(json)
            .map_err(|e| DeltaPinError::format(format!("malformed delta table: {}", e)))?;

        if raw.is_empty() {
            return Err(DeltaPinError::format("delta table is empty"));
        }

        let mut parsed: BTreeMap<u64, Vec<PinDeltaEntry>> = BTreeMap::new();
        for (key, list) in raw {
            let delta: u64 = key.trim().parse().map_err(|_| {
                DeltaPinError::format(format!("delta table key {:?} is not a non-negative integer", key))
            })?;
            if let Some(bad) = list.iter().find(|e| e.count == 0) {
                return Err(DeltaPinError::format(format!(
                    "delta table key {}: deltapin {} has a zero count",
                    delta, bad.pin_delta
                )));
            }
            if parsed.insert(delta, list).is_some() {
                return Err(DeltaPinError::format(format!("delta table key {} appears twice", delta)));
            }
        }

        Ok(Self::new(parsed))
    }

    /// Load the table from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| DeltaPinError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json(&data)?;
        info!(
            path = %path.display(),
            keys = table.len(),
            max_key = table.max_key(),
            "Loaded delta table"
        );
        Ok(table)
    }

    /// PIN deltas observed for an absolute address delta, most frequent first
    pub fn get(&self, address_delta: u64) -> Option<&[PinDeltaEntry]> {
        let found = self.entries.get(&address_delta).map(Vec::as_slice);
        if found.is_none() {
            debug!(address_delta, "No DeltaPINs for address delta");
        }
        found
    }

    /// Largest address delta present (0 for an empty table)
    pub fn max_key(&self) -> u64 {
        self.entries.keys().next_back().copied().unwrap_or(0)
    }

    /// Number of address deltas in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "5": [{"count": 1, "deltapin": 50}, {"count": 3, "deltapin": 100}],
        "12": [{"count": 2, "deltapin": -7}, {"count": 2, "deltapin": 9}, {"count": 4, "deltapin": 1}],
        "1": [{"count": 1, "deltapin": 3}]
    }"#;

    #[test]
    fn test_from_json_sorts_by_count() {
        let table = DeltaTable::from_json(SAMPLE).unwrap();
        assert_eq!(
            table.get(5).unwrap(),
            &[PinDeltaEntry::new(100, 3), PinDeltaEntry::new(50, 1)]
        );
        // ties keep their file order
        assert_eq!(
            table.get(12).unwrap(),
            &[PinDeltaEntry::new(1, 4), PinDeltaEntry::new(-7, 2), PinDeltaEntry::new(9, 2)]
        );
        for key in [1, 5, 12] {
            let list = table.get(key).unwrap();
            assert!(list.windows(2).all(|w| w[0].count >= w[1].count));
        }
    }

    #[test]
    fn test_max_key() {
        let table = DeltaTable::from_json(SAMPLE).unwrap();
        assert_eq!(table.max_key(), 12);
        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
        assert!(table.get(1).is_some());
        assert!(table.get(2).is_none());
        assert!(DeltaTable::default().is_empty());
        assert_eq!(DeltaTable::default().max_key(), 0);
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(DeltaTable::from_json("[]").unwrap_err().is_format());
        assert!(DeltaTable::from_json("{}").unwrap_err().is_format());
        assert!(DeltaTable::from_json(r#"{"x": []}"#).unwrap_err().is_format());
        assert!(DeltaTable::from_json(r#"{"-3": []}"#).unwrap_err().is_format());
        assert!(DeltaTable::from_json(r#"{"3": [{"count": 0, "deltapin": 1}]}"#).is_err());
        assert!(DeltaTable::from_json(r#"{"3": [{"deltapin": 1}]}"#).is_err());
        assert!(DeltaTable::from_json(r#"{"3": [], "03": []}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file.flush().unwrap();

        let table = DeltaTable::load(file.path()).unwrap();
        assert_eq!(table.max_key(), 12);
    }

    #[test]
    fn test_load_missing_file() {
        let err = DeltaTable::load(Path::new("/nonexistent/deltas.json")).unwrap_err();
        assert!(matches!(err, DeltaPinError::FileRead { .. }));
    }
}
