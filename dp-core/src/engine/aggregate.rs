//! Result aggregation strategies
//!
//! - **classical**: every anchor's list is presented on its own, unchanged.
//! - **unified**: one list of distinct PINs ranked by how many anchors produced
//!   them, then by the negated sum of their list positions.
//! - **unified1**: like unified, but the second key is the plain mean list
//!   position, still sorted descending. Among PINs with the same number of
//!   occurrences this ranks the one that sat *later* in its source lists
//!   first; the behaviour is kept as-is because both modes are user-selectable.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::AnchorPrediction;
use crate::error::{DeltaPinError, Result};

/// How per-anchor candidate lists are combined for presentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    #[default]
    Classical,
    Unified,
    Unified1,
}

impl AggregationMode {
    pub const ALL: [AggregationMode; 3] = [
        AggregationMode::Classical,
        AggregationMode::Unified,
        AggregationMode::Unified1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMode::Classical => "classical",
            AggregationMode::Unified => "unified",
            AggregationMode::Unified1 => "unified1",
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationMode {
    type Err = DeltaPinError;

    fn from_str(s: &str) -> Result<Self> {
        AggregationMode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                DeltaPinError::config(format!(
                    "unknown mode {:?} (expected classical, unified or unified1)",
                    s
                ))
            })
    }
}

/// Secondary ranking statistic of a merged PIN
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PositionScore {
    /// Negated sum of list positions (unified)
    NegatedSum(i64),
    /// Mean list position (unified1)
    MeanIndex(f64),
}

/// A distinct PIN in a merged ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPin {
    pub pin: String,
    /// Number of anchor lists containing the PIN
    pub occurrences: u32,
    pub score: PositionScore,
}

/// Presentation-ready ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Aggregation {
    /// Per-anchor lists in engine order
    Classical(Vec<AnchorPrediction>),
    /// Single merged list
    Ranked(Vec<RankedPin>),
}

impl Aggregation {
    /// Number of PIN rows the ranking will present
    pub fn pin_count(&self) -> usize {
        match self {
            Aggregation::Classical(predictions) => predictions.iter().map(|p| p.pins.len()).sum(),
            Aggregation::Ranked(pins) => pins.len(),
        }
    }
}

/// Per-PIN occurrence tally, in first-seen order
struct Tally {
    pin: String,
    positions: Vec<usize>,
}

fn tally(predictions: &[AnchorPrediction]) -> Vec<Tally> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<Tally> = Vec::new();
    for prediction in predictions {
        for (position, candidate) in prediction.pins.iter().enumerate() {
            let slot = *index.entry(candidate.pin.as_str()).or_insert_with(|| {
                tallies.push(Tally {
                    pin: candidate.pin.clone(),
                    positions: Vec::new(),
                });
                tallies.len() - 1
            });
            tallies[slot].positions.push(position);
        }
    }
    tallies
}

fn unified(predictions: &[AnchorPrediction]) -> Vec<RankedPin> {
    let mut ranked: Vec<(u32, i64, String)> = tally(predictions)
        .into_iter()
        .map(|t| {
            let negated: i64 = -(t.positions.iter().sum::<usize>() as i64);
            (t.positions.len() as u32, negated, t.pin)
        })
        .collect();
    ranked.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));
    ranked
        .into_iter()
        .map(|(occurrences, sum, pin)| RankedPin {
            pin,
            occurrences,
            score: PositionScore::NegatedSum(sum),
        })
        .collect()
}

fn unified1(predictions: &[AnchorPrediction]) -> Vec<RankedPin> {
    let mut ranked: Vec<(u32, f64, String)> = tally(predictions)
        .into_iter()
        .map(|t| {
            let mean = t.positions.iter().sum::<usize>() as f64 / t.positions.len() as f64;
            (t.positions.len() as u32, mean, t.pin)
        })
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.total_cmp(&a.1)));
    ranked
        .into_iter()
        .map(|(occurrences, mean, pin)| RankedPin {
            pin,
            occurrences,
            score: PositionScore::MeanIndex(mean),
        })
        .collect()
}

/// Combine the engine's per-anchor lists using `mode`
///
/// Fails with [`DeltaPinError::EmptyInput`] if there is no candidate at all.
pub fn aggregate(mode: AggregationMode, predictions: Vec<AnchorPrediction>) -> Result<Aggregation> {
    if predictions.iter().all(|p| p.pins.is_empty()) {
        return Err(DeltaPinError::EmptyInput);
    }
    Ok(match mode {
        AggregationMode::Classical => Aggregation::Classical(predictions),
        AggregationMode::Unified => Aggregation::Ranked(unified(&predictions)),
        AggregationMode::Unified1 => Aggregation::Ranked(unified1(&predictions)),
    })
}
