//! WPS PIN primitives and the PIN generation oracle
//!
//! A WPS PIN is seven data digits (the "core") followed by a checksum digit.
//! The [`PinOracle`] trait is the seam between the inference engine and
//! whatever knows how vendors derive PINs from hardware addresses.

mod algorithms;

pub use algorithms::{Algorithm, WpsPinGenerator};

use serde::Serialize;

use crate::address::Bssid;
use crate::constants::pin::{CORE_DIGITS, CORE_MODULUS, PIN_DIGITS};
use crate::error::{DeltaPinError, Result};

/// A PIN produced by a deterministic vendor algorithm
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPin {
    /// Full 8-digit PIN
    pub pin: String,
    /// Name of the algorithm that produced it
    pub name: String,
}

/// Source of WPS checksums and address-derived PIN candidates
#[cfg_attr(test, mockall::automock)]
pub trait PinOracle {
    /// Checksum digit for a 7-digit PIN core
    fn checksum(&self, core: u32) -> u8;

    /// Every deterministic (non-static) PIN candidate for an address
    fn generate(&self, bssid: &Bssid) -> Vec<GeneratedPin>;
}

/// Standard WPS checksum digit of a PIN core
pub fn checksum(core: u32) -> u8 {
    let mut pin = core;
    let mut accum = 0u32;
    while pin > 0 {
        accum += 3 * (pin % 10);
        pin /= 10;
        accum += pin % 10;
        pin /= 10;
    }
    ((10 - accum % 10) % 10) as u8
}

/// Complete a core into a zero-padded 8-digit PIN using the given checksum
pub fn format_pin(core: u32, checksum_digit: u8) -> String {
    format!("{:0width$}{}", core, checksum_digit, width = CORE_DIGITS)
}

/// Complete a core into a zero-padded 8-digit PIN
pub fn pin_from_core(core: u32) -> String {
    let core = (core as i64).rem_euclid(CORE_MODULUS) as u32;
    format_pin(core, checksum(core))
}

/// Extract the 7-digit core from an 8-digit PIN string
///
/// The checksum digit is not verified; database records occasionally carry
/// PINs with a wrong checksum and they are still useful anchors.
pub fn parse_pin_core(pin: &str) -> Result<u32> {
    if pin.len() != PIN_DIGITS {
        return Err(DeltaPinError::invalid_pin(
            pin,
            format!("expected {} digits, found {}", PIN_DIGITS, pin.len()),
        ));
    }
    if !pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DeltaPinError::invalid_pin(pin, "non-digit character"));
    }
    pin[..CORE_DIGITS]
        .parse()
        .map_err(|e: std::num::ParseIntError| DeltaPinError::invalid_pin(pin, e.to_string()))
}
