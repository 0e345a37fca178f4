//! Hardware address codec
//!
//! Converts between colon-separated hex BSSID strings and their 48-bit integer
//! value, and provides the signed arithmetic the delta engine works with.
//!
//! Arithmetic wraps modulo 2^48: stepping below `00:00:00:00:00:00` lands on
//! `FF:FF:FF:FF:FF:FF` instead of producing an out-of-range address.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::address::{ADDRESS_BITS, ADDRESS_MASK, HEX_DIGITS, NIC_MASK};
use crate::error::{DeltaPinError, Result};

/// A 48-bit wireless hardware address (BSSID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bssid(u64);

impl Bssid {
    /// Build an address from its integer value; bits above 48 are discarded
    pub fn from_u64(value: u64) -> Self {
        Self(value & ADDRESS_MASK)
    }

    /// Integer value of the address
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The six address octets, most significant first
    pub fn octets(&self) -> [u8; 6] {
        let b = self.0.to_be_bytes();
        [b[2], b[3], b[4], b[5], b[6], b[7]]
    }

    /// Vendor (OUI) half of the address
    pub fn oui(&self) -> u64 {
        self.0 >> 24
    }

    /// Device-specific (NIC) half of the address
    pub fn nic(&self) -> u64 {
        self.0 & NIC_MASK
    }

    /// Address shifted by `delta`, wrapping within 48 bits
    pub fn offset(&self, delta: i64) -> Self {
        let shifted = (self.0 as i128 + delta as i128).rem_euclid(1i128 << ADDRESS_BITS);
        Self(shifted as u64)
    }

    /// Signed distance `self - other`
    pub fn delta_from(&self, other: &Bssid) -> i64 {
        self.0 as i64 - other.0 as i64
    }

    /// 3WiFi search mask covering the 16 addresses around this one
    ///
    /// `11:22:33:44:55:66` becomes `11:22:33:44:5*`.
    pub fn search_mask(&self) -> String {
        let text = self.to_string();
        // "XX:XX:XX:XX:X" is the first 13 characters of the canonical form
        format!("{}*", &text[..13])
    }
}

impl fmt::Display for Bssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.octets();
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl FromStr for Bssid {
    type Err = DeltaPinError;

    fn from_str(s: &str) -> Result<Self> {
        mac_to_int(s).map(Self)
    }
}

impl TryFrom<String> for Bssid {
    type Error = DeltaPinError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Bssid> for String {
    fn from(value: Bssid) -> Self {
        value.to_string()
    }
}

/// Parse a hardware address string into its integer value
///
/// Separators (`:` or `-`) are ignored; exactly twelve hex digits must remain.
pub fn mac_to_int(address: &str) -> Result<u64> {
    let digits: String = address
        .trim()
        .chars()
        .filter(|c| !matches!(c, ':' | '-'))
        .collect();

    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(DeltaPinError::invalid_address(
            address,
            format!("non-hex character {:?}", bad),
        ));
    }
    if digits.len() != HEX_DIGITS {
        return Err(DeltaPinError::invalid_address(
            address,
            format!("expected {} hex digits, found {}", HEX_DIGITS, digits.len()),
        ));
    }

    u64::from_str_radix(&digits, 16)
        .map_err(|e| DeltaPinError::invalid_address(address, e.to_string()))
}

/// Render an integer as a canonical uppercase colon-separated address
pub fn int_to_mac(value: u64) -> String {
    Bssid::from_u64(value).to_string()
}

/// Add `delta` to an address string
pub fn increment_mac(address: &str, delta: i64) -> Result<String> {
    let bssid: Bssid = address.parse()?;
    Ok(bssid.offset(delta).to_string())
}

/// Subtract the second address from the first
pub fn subtract_macs(a: &str, b: &str) -> Result<i64> {
    let a: Bssid = a.parse()?;
    let b: Bssid = b.parse()?;
    Ok(a.delta_from(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_to_int() {
        assert_eq!(mac_to_int("00:00:00:00:00:01").unwrap(), 1);
        assert_eq!(mac_to_int("C8:3A:35:00:00:0F").unwrap(), 0xC83A3500000F);
        assert_eq!(mac_to_int("c8-3a-35-00-00-0f").unwrap(), 0xC83A3500000F);
        assert_eq!(mac_to_int("FFFFFFFFFFFF").unwrap(), ADDRESS_MASK);
    }

    #[test]
    fn test_mac_to_int_rejects_garbage() {
        assert!(mac_to_int("C8:3A:35:00:00").unwrap_err().is_format());
        assert!(mac_to_int("C8:3A:35:00:00:0G").unwrap_err().is_format());
        assert!(mac_to_int("C8:3A:35:00:00:0F:01").is_err());
        assert!(mac_to_int("").is_err());
    }

    #[test]
    fn test_int_to_mac_pads_and_uppercases() {
        assert_eq!(int_to_mac(0), "00:00:00:00:00:00");
        assert_eq!(int_to_mac(0xC83A3500000F), "C8:3A:35:00:00:0F");
        assert_eq!(int_to_mac(0xab), "00:00:00:00:00:AB");
    }

    #[test]
    fn test_round_trip() {
        for value in [0u64, 1, 0xFF, 0x1234_5678_9ABC, 0xC83A35D2A5F0, ADDRESS_MASK] {
            assert_eq!(mac_to_int(&int_to_mac(value)).unwrap(), value);
        }
    }

    #[test]
    fn test_increment_mac() {
        assert_eq!(increment_mac("C8:3A:35:00:00:0F", 1).unwrap(), "C8:3A:35:00:00:10");
        assert_eq!(increment_mac("C8:3A:35:00:01:00", -1).unwrap(), "C8:3A:35:00:00:FF");
        assert_eq!(increment_mac("00:00:00:00:00:00", -1).unwrap(), "FF:FF:FF:FF:FF:FF");
        assert_eq!(increment_mac("FF:FF:FF:FF:FF:FF", 1).unwrap(), "00:00:00:00:00:00");
    }

    #[test]
    fn test_subtract_is_antisymmetric() {
        let pairs = [
            ("C8:3A:35:00:00:0F", "C8:3A:35:00:00:01"),
            ("00:00:00:00:00:00", "FF:FF:FF:FF:FF:FF"),
            ("04:95:E6:12:34:56", "04:95:E6:12:30:00"),
        ];
        for (a, b) in pairs {
            assert_eq!(subtract_macs(a, b).unwrap(), -subtract_macs(b, a).unwrap());
        }
        assert_eq!(subtract_macs("C8:3A:35:00:00:0F", "C8:3A:35:00:00:01").unwrap(), 14);
    }

    #[test]
    fn test_bssid_parts() {
        let bssid: Bssid = "C8:3A:35:D2:A5:F0".parse().unwrap();
        assert_eq!(bssid.octets(), [0xC8, 0x3A, 0x35, 0xD2, 0xA5, 0xF0]);
        assert_eq!(bssid.oui(), 0xC83A35);
        assert_eq!(bssid.nic(), 0xD2A5F0);
    }

    #[test]
    fn test_search_mask() {
        let bssid: Bssid = "11:22:33:44:55:66".parse().unwrap();
        assert_eq!(bssid.search_mask(), "11:22:33:44:5*");
    }

    #[test]
    fn test_serde_as_string() {
        let bssid: Bssid = "c8:3a:35:d2:a5:f0".parse().unwrap();
        let json = serde_json::to_string(&bssid).unwrap();
        assert_eq!(json, "\"C8:3A:35:D2:A5:F0\"");
        let back: Bssid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bssid);
        assert!(serde_json::from_str::<Bssid>("\"nope\"").is_err());
    }
}
