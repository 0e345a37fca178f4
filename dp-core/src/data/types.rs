//! Core data types for DeltaPIN
//!
//! Defines the records, anchors and candidates that flow through the engine.

use serde::{Deserialize, Serialize};

use crate::address::Bssid;

/// A record as returned by the wireless database
///
/// Only the fields the engine needs are kept; everything else in the remote
/// payload is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub bssid: String,
    #[serde(default)]
    pub wps: Option<String>,
}

impl RawRecord {
    pub fn new(bssid: impl Into<String>, wps: impl Into<String>) -> Self {
        Self {
            bssid: bssid.into(),
            wps: Some(wps.into()),
        }
    }
}

/// Observed PIN offset for one address delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinDeltaEntry {
    #[serde(rename = "deltapin")]
    pub pin_delta: i64,
    pub count: u32,
}

impl PinDeltaEntry {
    pub fn new(pin_delta: i64, count: u32) -> Self {
        Self { pin_delta, count }
    }

    /// Seen more than once in the reference corpus
    pub fn is_major(&self) -> bool {
        self.count > 1
    }
}

/// A neighbouring access point whose PIN is not explained by a known algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnchorPoint {
    pub address: Bssid,
    /// First seven digits of the anchor's PIN
    pub pin_core: u32,
}

impl AnchorPoint {
    pub fn new(address: Bssid, pin_core: u32) -> Self {
        Self { address, pin_core }
    }
}

/// An anchor together with its signed distance to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnchorDelta {
    pub anchor: AnchorPoint,
    /// `anchor.address - target`
    pub address_delta: i64,
}

impl AnchorDelta {
    /// Table key for this delta
    pub fn table_key(&self) -> u64 {
        self.address_delta.unsigned_abs()
    }
}

/// A PIN inferred for the target from one anchor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidatePin {
    /// Full 8-digit PIN
    pub pin: String,
    pub pin_delta: i64,
    /// How often `pin_delta` was observed for this address delta
    pub count: u32,
}

impl CandidatePin {
    pub fn is_major(&self) -> bool {
        self.count > 1
    }
}

/// Ranked candidates derived from a single anchor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnchorPrediction {
    pub anchor: AnchorPoint,
    pub address_delta: i64,
    pub pins: Vec<CandidatePin>,
}
