//! Published MAC-derived WPS PIN algorithms
//!
//! Each algorithm maps a BSSID to an integer; the integer is reduced into the
//! 7-digit core range and completed with the WPS checksum.

use crate::address::Bssid;
use crate::constants::address::NIC_MASK;
use crate::constants::pin::CORE_MODULUS;

use super::{checksum, format_pin, GeneratedPin, PinOracle};

/// A deterministic address-to-PIN algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Pin24,
    Pin28,
    Pin32,
    Pin36,
    Pin40,
    Pin44,
    Pin48,
    ReverseByte24,
    ReverseByte32,
    ReverseByte48,
    ReverseNibble24,
    ReverseNibble32,
    ReverseNibble48,
    ReverseBits24,
    ReverseBits32,
    ReverseBits48,
    DLink,
    DLinkPlusOne,
    Asus,
    Airocon,
    InvertedNic,
    NicTimesTwo,
    NicTimesThree,
    OuiPlusNic,
    OuiMinusNic,
    OuiXorNic,
}

impl Algorithm {
    /// Every known algorithm, in reporting order
    pub const ALL: &'static [Algorithm] = &[
        Algorithm::Pin24,
        Algorithm::Pin28,
        Algorithm::Pin32,
        Algorithm::Pin36,
        Algorithm::Pin40,
        Algorithm::Pin44,
        Algorithm::Pin48,
        Algorithm::ReverseByte24,
        Algorithm::ReverseByte32,
        Algorithm::ReverseByte48,
        Algorithm::ReverseNibble24,
        Algorithm::ReverseNibble32,
        Algorithm::ReverseNibble48,
        Algorithm::ReverseBits24,
        Algorithm::ReverseBits32,
        Algorithm::ReverseBits48,
        Algorithm::DLink,
        Algorithm::DLinkPlusOne,
        Algorithm::Asus,
        Algorithm::Airocon,
        Algorithm::InvertedNic,
        Algorithm::NicTimesTwo,
        Algorithm::NicTimesThree,
        Algorithm::OuiPlusNic,
        Algorithm::OuiMinusNic,
        Algorithm::OuiXorNic,
    ];

    /// Human readable algorithm name
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Pin24 => "24-bit PIN",
            Algorithm::Pin28 => "28-bit PIN",
            Algorithm::Pin32 => "32-bit PIN",
            Algorithm::Pin36 => "36-bit PIN",
            Algorithm::Pin40 => "40-bit PIN",
            Algorithm::Pin44 => "44-bit PIN",
            Algorithm::Pin48 => "48-bit PIN",
            Algorithm::ReverseByte24 => "Reverse byte 24-bit",
            Algorithm::ReverseByte32 => "Reverse byte 32-bit",
            Algorithm::ReverseByte48 => "Reverse byte 48-bit",
            Algorithm::ReverseNibble24 => "Reverse nibble 24-bit",
            Algorithm::ReverseNibble32 => "Reverse nibble 32-bit",
            Algorithm::ReverseNibble48 => "Reverse nibble 48-bit",
            Algorithm::ReverseBits24 => "Reverse bits 24-bit",
            Algorithm::ReverseBits32 => "Reverse bits 32-bit",
            Algorithm::ReverseBits48 => "Reverse bits 48-bit",
            Algorithm::DLink => "D-Link PIN",
            Algorithm::DLinkPlusOne => "D-Link PIN +1",
            Algorithm::Asus => "ASUS PIN",
            Algorithm::Airocon => "Airocon Realtek",
            Algorithm::InvertedNic => "Inv NIC to PIN",
            Algorithm::NicTimesTwo => "NIC * 2",
            Algorithm::NicTimesThree => "NIC * 3",
            Algorithm::OuiPlusNic => "OUI + NIC",
            Algorithm::OuiMinusNic => "OUI - NIC",
            Algorithm::OuiXorNic => "OUI ^ NIC",
        }
    }

    /// Raw integer produced for an address, before reduction to a PIN core
    pub fn raw_value(&self, bssid: &Bssid) -> u64 {
        let mac = bssid.as_u64();
        let nic = bssid.nic();
        let oui = bssid.oui();
        match self {
            Algorithm::Pin24 => low_bits(mac, 24),
            Algorithm::Pin28 => low_bits(mac, 28),
            Algorithm::Pin32 => low_bits(mac, 32),
            Algorithm::Pin36 => low_bits(mac, 36),
            Algorithm::Pin40 => low_bits(mac, 40),
            Algorithm::Pin44 => low_bits(mac, 44),
            Algorithm::Pin48 => mac,
            Algorithm::ReverseByte24 => reverse_bytes(mac, 3),
            Algorithm::ReverseByte32 => reverse_bytes(mac, 4),
            Algorithm::ReverseByte48 => reverse_bytes(mac, 6),
            Algorithm::ReverseNibble24 => reverse_nibbles(mac, 6),
            Algorithm::ReverseNibble32 => reverse_nibbles(mac, 8),
            Algorithm::ReverseNibble48 => reverse_nibbles(mac, 12),
            Algorithm::ReverseBits24 => reverse_bits(mac, 24),
            Algorithm::ReverseBits32 => reverse_bits(mac, 32),
            Algorithm::ReverseBits48 => reverse_bits(mac, 48),
            Algorithm::DLink => dlink(nic),
            Algorithm::DLinkPlusOne => dlink(bssid.offset(1).nic()),
            Algorithm::Asus => asus(&bssid.octets()),
            Algorithm::Airocon => airocon(&bssid.octets()),
            Algorithm::InvertedNic => !nic & NIC_MASK,
            Algorithm::NicTimesTwo => nic * 2,
            Algorithm::NicTimesThree => nic * 3,
            Algorithm::OuiPlusNic => (oui + nic) & NIC_MASK,
            Algorithm::OuiMinusNic => {
                if nic < oui {
                    oui - nic
                } else {
                    (oui + 0x100_0000 - nic) & NIC_MASK
                }
            }
            Algorithm::OuiXorNic => oui ^ nic,
        }
    }

    /// The 7-digit PIN core for an address
    pub fn core(&self, bssid: &Bssid) -> u32 {
        (self.raw_value(bssid) % CORE_MODULUS as u64) as u32
    }

    /// The full 8-digit PIN for an address
    pub fn pin(&self, bssid: &Bssid) -> String {
        let core = self.core(bssid);
        format_pin(core, checksum(core))
    }
}

fn low_bits(value: u64, bits: u32) -> u64 {
    value & ((1u64 << bits) - 1)
}

fn reverse_bytes(value: u64, bytes: u32) -> u64 {
    let mut out = 0u64;
    for i in 0..bytes {
        out = (out << 8) | ((value >> (8 * i)) & 0xFF);
    }
    out
}

fn reverse_nibbles(value: u64, nibbles: u32) -> u64 {
    let mut out = 0u64;
    for i in 0..nibbles {
        out = (out << 4) | ((value >> (4 * i)) & 0xF);
    }
    out
}

fn reverse_bits(value: u64, bits: u32) -> u64 {
    low_bits(value, bits).reverse_bits() >> (64 - bits)
}

fn dlink(nic: u64) -> u64 {
    let mut pin = nic ^ 0x55AA55;
    let low = pin & 0xF;
    pin ^= (low << 4) + (low << 8) + (low << 12) + (low << 16) + (low << 20);
    pin %= CORE_MODULUS as u64;
    if pin < 1_000_000 {
        pin += (pin % 9) * 1_000_000 + 1_000_000;
    }
    pin
}

fn asus(b: &[u8; 6]) -> u64 {
    let b: Vec<u64> = b.iter().map(|&x| x as u64).collect();
    let tail: u64 = b[1] + b[2] + b[3] + b[4] + b[5];
    (0..7u64).fold(0, |pin, i| {
        let modulus = 10 - (i + tail) % 7;
        pin * 10 + (b[(i % 6) as usize] + b[5]) % modulus
    })
}

fn airocon(b: &[u8; 6]) -> u64 {
    let pair = |x: usize, y: usize| (b[x] as u64 + b[y] as u64) % 10;
    pair(0, 1)
        + pair(5, 0) * 10
        + pair(4, 5) * 100
        + pair(3, 4) * 1_000
        + pair(2, 3) * 10_000
        + pair(1, 2) * 100_000
        + pair(0, 1) * 1_000_000
}

/// PIN oracle backed by the built-in algorithm catalogue
#[derive(Debug, Clone)]
pub struct WpsPinGenerator {
    algorithms: Vec<Algorithm>,
}

impl WpsPinGenerator {
    /// Generator using every known algorithm
    pub fn new() -> Self {
        Self {
            algorithms: Algorithm::ALL.to_vec(),
        }
    }

    /// Generator restricted to the given algorithms
    pub fn with_algorithms(algorithms: Vec<Algorithm>) -> Self {
        Self { algorithms }
    }
}

impl Default for WpsPinGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PinOracle for WpsPinGenerator {
    fn checksum(&self, core: u32) -> u8 {
        checksum(core)
    }

    fn generate(&self, bssid: &Bssid) -> Vec<GeneratedPin> {
        self.algorithms
            .iter()
            .map(|algo| GeneratedPin {
                pin: algo.pin(bssid),
                name: algo.name().to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bssid(s: &str) -> Bssid {
        s.parse().unwrap()
    }

    #[test]
    fn test_simple_bit_algorithms() {
        let mac = bssid("C8:3A:35:D2:A5:F0");
        assert_eq!(Algorithm::Pin24.raw_value(&mac), 0xD2A5F0);
        assert_eq!(Algorithm::Pin32.raw_value(&mac), 0x35D2A5F0);
        assert_eq!(Algorithm::Pin24.pin(&mac), "38050404");
    }

    #[test]
    fn test_reversal_helpers() {
        assert_eq!(reverse_bytes(0x11_2233, 3), 0x33_2211);
        assert_eq!(reverse_nibbles(0x12_3456, 6), 0x65_4321);
        assert_eq!(reverse_bits(0b1, 24), 1 << 23);
        assert_eq!(reverse_bits(0x8000_0000, 32), 1);
    }

    #[test]
    fn test_vendor_algorithms() {
        let mac = bssid("C8:3A:35:D2:A5:F0");
        assert_eq!(Algorithm::DLink.pin(&mac), "37858452");
        assert_eq!(Algorithm::Asus.pin(&mac), "02305424");
        assert_eq!(Algorithm::Airocon.pin(&mac), "81355082");
    }

    #[test]
    fn test_dlink_plus_one_uses_next_address() {
        let mac = bssid("C8:3A:35:D2:A5:F0");
        let next = mac.offset(1);
        assert_eq!(Algorithm::DLinkPlusOne.pin(&mac), Algorithm::DLink.pin(&next));
    }

    #[test]
    fn test_generator_covers_every_algorithm() {
        let generator = WpsPinGenerator::new();
        let pins = generator.generate(&bssid("00:11:22:33:44:55"));
        assert_eq!(pins.len(), Algorithm::ALL.len());
        assert!(pins.iter().all(|p| p.pin.len() == 8 && p.pin.bytes().all(|b| b.is_ascii_digit())));
        assert_eq!(pins[0].name, "24-bit PIN");
    }

    #[test]
    fn test_restricted_generator() {
        let generator = WpsPinGenerator::with_algorithms(vec![Algorithm::Pin24]);
        let pins = generator.generate(&bssid("C8:3A:35:D2:A5:F0"));
        assert_eq!(pins, vec![GeneratedPin { pin: "38050404".into(), name: "24-bit PIN".into() }]);
    }
}
