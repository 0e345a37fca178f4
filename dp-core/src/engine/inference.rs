//! Delta-based PIN inference
//!
//! # How It Works
//!
//! 1. **Delta resolution**: every anchor's address is subtracted from the
//!    target's. Zero deltas, repeated deltas (first anchor wins) and deltas
//!    beyond the table's largest key are discarded.
//!
//! 2. **Ordering**: the surviving anchors are ordered by absolute delta, so
//!    the closest neighbours are used first. Ties keep anchor order.
//!
//! 3. **Selection**: anchors whose delta has no table entry are skipped and
//!    do not count toward the anchor limit.
//!
//! 4. **Prediction**: each observed PIN delta is undone on the anchor's PIN
//!    core (subtracted when the anchor sits above the target, added when it
//!    sits below), wrapped into the 7-digit range and completed with the
//!    checksum.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::address::Bssid;
use crate::constants::pin::CORE_MODULUS;
use crate::data::{AnchorDelta, AnchorPoint, AnchorPrediction, CandidatePin, DeltaTable, PinDeltaEntry};
use crate::error::{DeltaPinError, Result};
use crate::wps::{format_pin, PinOracle};

/// Tuning knobs for a single inference run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InferenceOptions {
    /// Maximum anchors to use; 0 means unlimited
    pub max_anchors: usize,
    /// Only use PIN deltas seen more than once
    pub major_only: bool,
}

/// PIN inference over an injected delta table and checksum oracle
pub struct InferenceEngine<'a, O: PinOracle + ?Sized> {
    table: &'a DeltaTable,
    oracle: &'a O,
}

impl<'a, O: PinOracle + ?Sized> InferenceEngine<'a, O> {
    pub fn new(table: &'a DeltaTable, oracle: &'a O) -> Self {
        Self { table, oracle }
    }

    /// Usable anchors for `target` with their address deltas, closest first
    ///
    /// Fails with [`DeltaPinError::NoAnchors`] when nothing survives.
    pub fn resolve_deltas(&self, target: &Bssid, anchors: &[AnchorPoint]) -> Result<Vec<AnchorDelta>> {
        if self.table.is_empty() {
            warn!("Delta table is empty, no anchor can be used");
            return Err(DeltaPinError::NoAnchors);
        }
        let max_key = self.table.max_key();
        let mut seen: HashSet<i64> = HashSet::new();
        let mut deltas: Vec<AnchorDelta> = Vec::new();

        for anchor in anchors {
            let address_delta = anchor.address.delta_from(target);
            if address_delta == 0 {
                continue;
            }
            if !seen.insert(address_delta) {
                debug!(bssid = %anchor.address, address_delta, "Dropping anchor with repeated delta");
                continue;
            }
            if address_delta.unsigned_abs() > max_key {
                continue;
            }
            deltas.push(AnchorDelta { anchor: *anchor, address_delta });
        }

        if deltas.is_empty() {
            return Err(DeltaPinError::NoAnchors);
        }

        deltas.sort_by_key(|d| d.address_delta.unsigned_abs());
        Ok(deltas)
    }

    /// Ranked PIN candidates per anchor, closest anchor first
    ///
    /// Fails with [`DeltaPinError::NoAnchors`] when no anchor has a usable
    /// delta and with [`DeltaPinError::NoCandidates`] when the retained
    /// anchors produce no candidate at all.
    pub fn infer(
        &self,
        target: &Bssid,
        anchors: &[AnchorPoint],
        options: InferenceOptions,
    ) -> Result<Vec<AnchorPrediction>> {
        let deltas = self.resolve_deltas(target, anchors)?;
        self.infer_resolved(target, &deltas, options)
    }

    /// Same as [`InferenceEngine::infer`] for deltas already returned by
    /// [`InferenceEngine::resolve_deltas`]
    pub fn infer_resolved(
        &self,
        target: &Bssid,
        deltas: &[AnchorDelta],
        options: InferenceOptions,
    ) -> Result<Vec<AnchorPrediction>> {
        let mut predictions: Vec<AnchorPrediction> = Vec::new();

        for delta in deltas {
            let Some(entries) = self.table.get(delta.table_key()) else {
                continue;
            };
            let pins = self.predict(delta, entries, options.major_only);
            debug!(
                bssid = %delta.anchor.address,
                address_delta = delta.address_delta,
                candidates = pins.len(),
                "Anchor predicted"
            );
            predictions.push(AnchorPrediction {
                anchor: delta.anchor,
                address_delta: delta.address_delta,
                pins,
            });
            if options.max_anchors != 0 && predictions.len() == options.max_anchors {
                break;
            }
        }

        if predictions.iter().all(|p| p.pins.is_empty()) {
            return Err(DeltaPinError::NoCandidates);
        }

        info!(
            target = %target,
            anchors = predictions.len(),
            candidates = predictions.iter().map(|p| p.pins.len()).sum::<usize>(),
            "Inference complete"
        );
        Ok(predictions)
    }

    fn predict(&self, delta: &AnchorDelta, entries: &[PinDeltaEntry], major_only: bool) -> Vec<CandidatePin> {
        let core = delta.anchor.pin_core as i64;
        entries
            .iter()
            .filter(|entry| !major_only || entry.is_major())
            .map(|entry| {
                let shift = entry.pin_delta.rem_euclid(CORE_MODULUS);
                let rest = if delta.address_delta > 0 { core - shift } else { core + shift };
                let rest = rest.rem_euclid(CORE_MODULUS) as u32;
                CandidatePin {
                    pin: format_pin(rest, self.oracle.checksum(rest)),
                    pin_delta: entry.pin_delta,
                    count: entry.count,
                }
            })
            .collect()
    }
}

/// Run the engine once; see [`InferenceEngine::infer`]
pub fn infer<O: PinOracle + ?Sized>(
    target: &Bssid,
    anchors: &[AnchorPoint],
    table: &DeltaTable,
    oracle: &O,
    options: InferenceOptions,
) -> Result<Vec<AnchorPrediction>> {
    InferenceEngine::new(table, oracle).infer(target, anchors, options)
}
