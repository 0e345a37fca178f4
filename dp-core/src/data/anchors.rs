//! Anchor selection from raw database records

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::address::Bssid;
use crate::data::types::{AnchorPoint, RawRecord};
use crate::matcher::match_pin;
use crate::wps::{parse_pin_core, PinOracle};

/// Result of filtering the database records for a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The database already holds a PIN for the target itself
    KnownPin(String),
    /// Usable anchors, in record order
    Anchors(Vec<AnchorPoint>),
}

/// Turn raw records into the anchor set for `target`
///
/// Records without a well-formed address and 8-digit PIN are skipped. Unless
/// `ignore_known_pin` is set, a record for the target itself short-circuits
/// with [`FilterOutcome::KnownPin`]. PINs explained by a static set or vendor
/// algorithm are dropped, and only the first record per address is kept.
pub fn filter_records<O: PinOracle + ?Sized>(
    target: &Bssid,
    records: &[RawRecord],
    oracle: &O,
    ignore_known_pin: bool,
) -> FilterOutcome {
    let mut seen: HashSet<Bssid> = HashSet::new();
    let mut anchors = Vec::new();

    for record in records {
        let address: Bssid = match record.bssid.parse() {
            Ok(address) => address,
            Err(e) => {
                warn!(bssid = %record.bssid, error = %e, "Skipping record with malformed BSSID");
                continue;
            }
        };
        let pin = match record.wps.as_deref() {
            Some(pin) => pin.trim(),
            None => {
                debug!(bssid = %address, "Skipping record without a WPS PIN");
                continue;
            }
        };
        let core = match parse_pin_core(pin) {
            Ok(core) => core,
            Err(e) => {
                warn!(bssid = %address, error = %e, "Skipping record with malformed PIN");
                continue;
            }
        };

        if !ignore_known_pin && address == *target {
            return FilterOutcome::KnownPin(pin.to_string());
        }

        let reason = match_pin(&address, pin, oracle);
        if reason.is_explained() {
            debug!(bssid = %address, pin, reason = %reason, "Dropping explained PIN");
            continue;
        }
        if !seen.insert(address) {
            debug!(bssid = %address, "Dropping duplicate BSSID");
            continue;
        }
        anchors.push(AnchorPoint::new(address, core));
    }

    FilterOutcome::Anchors(anchors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wps::{Algorithm, WpsPinGenerator};

    fn bssid(s: &str) -> Bssid {
        s.parse().unwrap()
    }

    fn oracle() -> WpsPinGenerator {
        WpsPinGenerator::with_algorithms(vec![Algorithm::Pin24])
    }

    #[test]
    fn test_known_pin_short_circuits() {
        let target = bssid("C8:3A:35:D2:A5:F0");
        let records = vec![
            RawRecord::new("C8:3A:35:D2:A5:F3", "11111113"),
            RawRecord::new("c8:3a:35:d2:a5:f0", "22222226"),
        ];
        assert_eq!(
            filter_records(&target, &records, &oracle(), false),
            FilterOutcome::KnownPin("22222226".to_string())
        );
    }

    #[test]
    fn test_ignore_known_pin_keeps_target_record() {
        let target = bssid("C8:3A:35:D2:A5:F0");
        let records = vec![RawRecord::new("C8:3A:35:D2:A5:F0", "22222226")];
        match filter_records(&target, &records, &oracle(), true) {
            FilterOutcome::Anchors(anchors) => {
                assert_eq!(anchors, vec![AnchorPoint::new(target, 2222222)]);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_explained_and_duplicate_records_dropped() {
        let target = bssid("C8:3A:35:D2:A5:F0");
        let neighbour = bssid("C8:3A:35:D2:A5:F4");
        let records = vec![
            RawRecord::new("C8:3A:35:D2:A5:F1", "12345670"),
            RawRecord::new("C8:3A:35:D2:A5:F2", &Algorithm::Pin24.pin(&bssid("C8:3A:35:D2:A5:F3"))),
            RawRecord::new("C8:3A:35:D2:A5:F4", "11111113"),
            RawRecord::new("C8:3A:35:D2:A5:F4", "33333331"),
        ];
        assert_eq!(
            filter_records(&target, &records, &oracle(), false),
            FilterOutcome::Anchors(vec![AnchorPoint::new(neighbour, 1111111)])
        );
    }

    #[test]
    fn test_malformed_records_skipped() {
        let target = bssid("C8:3A:35:D2:A5:F0");
        let records = vec![
            RawRecord::new("not-a-mac", "11111113"),
            RawRecord { bssid: "C8:3A:35:D2:A5:F1".into(), wps: None },
            RawRecord::new("C8:3A:35:D2:A5:F2", "1234"),
            RawRecord::new("C8:3A:35:D2:A5:F5", " 44444442 "),
        ];
        assert_eq!(
            filter_records(&target, &records, &oracle(), false),
            FilterOutcome::Anchors(vec![AnchorPoint::new(bssid("C8:3A:35:D2:A5:F5"), 4444444)])
        );
    }
}
