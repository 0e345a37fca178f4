//! Static and algorithmic PIN recognition
//!
//! A database PIN that is a well-known static value, or that a vendor
//! algorithm derives from the address (or one of its ±1 sibling radios), says
//! nothing about the delta distribution. Such records are excluded from the
//! anchor set.

use std::fmt;

use tracing::trace;

use crate::address::Bssid;
use crate::constants::static_pins;
use crate::wps::PinOracle;

/// Why a PIN is (or is not) already explained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// One of the universally common static PINs
    StaticCommon,
    /// A static PIN known from vendor firmware
    StaticVendor,
    /// Produced by the named algorithm for the address or a neighbour
    Algorithm(String),
    /// Not explained by anything known
    NoMatch,
}

impl MatchResult {
    /// True when the PIN is explained and carries no delta information
    pub fn is_explained(&self) -> bool {
        !matches!(self, MatchResult::NoMatch)
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::StaticCommon => write!(f, "common static PIN"),
            MatchResult::StaticVendor => write!(f, "vendor static PIN"),
            MatchResult::Algorithm(name) => write!(f, "{}", name),
            MatchResult::NoMatch => write!(f, "no match"),
        }
    }
}

/// Classify `pin` for `address` against static sets and the oracle's algorithms
pub fn match_pin<O: PinOracle + ?Sized>(address: &Bssid, pin: &str, oracle: &O) -> MatchResult {
    if static_pins::COMMON.contains(&pin) {
        return MatchResult::StaticCommon;
    }
    if static_pins::TENDA.contains(&pin) {
        return MatchResult::StaticVendor;
    }

    let neighbours = [*address, address.offset(-1), address.offset(1)];
    for mac in &neighbours {
        if let Some(hit) = oracle.generate(mac).into_iter().find(|g| g.pin == pin) {
            trace!(address = %address, via = %mac, algorithm = %hit.name, "PIN explained by algorithm");
            return MatchResult::Algorithm(hit.name);
        }
    }

    MatchResult::NoMatch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wps::{Algorithm, GeneratedPin, MockPinOracle, WpsPinGenerator};
    use mockall::predicate::eq;

    fn bssid(s: &str) -> Bssid {
        s.parse().unwrap()
    }

    #[test]
    fn test_static_sets() {
        let oracle = WpsPinGenerator::new();
        let mac = bssid("C8:3A:35:D2:A5:F0");
        assert_eq!(match_pin(&mac, "12345670", &oracle), MatchResult::StaticCommon);
        assert_eq!(match_pin(&mac, "00000000", &oracle), MatchResult::StaticCommon);
        assert_eq!(match_pin(&mac, "03436080", &oracle), MatchResult::StaticVendor);
    }

    #[test]
    fn test_exact_address_algorithm() {
        let oracle = WpsPinGenerator::new();
        let mac = bssid("C8:3A:35:D2:A5:F0");
        let pin = Algorithm::Pin24.pin(&mac);
        assert_eq!(
            match_pin(&mac, &pin, &oracle),
            MatchResult::Algorithm("24-bit PIN".to_string())
        );
    }

    #[test]
    fn test_neighbour_addresses_are_checked() {
        let oracle = WpsPinGenerator::with_algorithms(vec![Algorithm::Pin24]);
        let mac = bssid("C8:3A:35:D2:A5:F0");
        let below = Algorithm::Pin24.pin(&mac.offset(-1));
        let above = Algorithm::Pin24.pin(&mac.offset(1));
        assert!(match_pin(&mac, &below, &oracle).is_explained());
        assert!(match_pin(&mac, &above, &oracle).is_explained());
        let far = Algorithm::Pin24.pin(&mac.offset(2));
        assert_eq!(match_pin(&mac, &far, &oracle), MatchResult::NoMatch);
    }

    #[test]
    fn test_oracle_queried_for_each_neighbour() {
        let mac = bssid("00:11:22:33:44:55");
        let mut oracle = MockPinOracle::new();
        oracle.expect_generate().with(eq(mac)).times(1).returning(|_| Vec::new());
        oracle
            .expect_generate()
            .with(eq(mac.offset(-1)))
            .times(1)
            .returning(|_| Vec::new());
        oracle
            .expect_generate()
            .with(eq(mac.offset(1)))
            .times(1)
            .returning(|_| vec![GeneratedPin { pin: "11111113".into(), name: "Sibling".into() }]);

        assert_eq!(
            match_pin(&mac, "11111113", &oracle),
            MatchResult::Algorithm("Sibling".to_string())
        );
    }

    #[test]
    fn test_static_short_circuits_oracle() {
        let mut oracle = MockPinOracle::new();
        oracle.expect_generate().never();
        let mac = bssid("00:11:22:33:44:55");
        assert!(match_pin(&mac, "12345678", &oracle).is_explained());
    }
}
