//! DeltaPIN Core Library
//!
//! Delta-based WPS PIN inference for access points whose vendors assign PINs
//! in step with hardware addresses.
//!
//! # Features
//!
//! - **Address Codec**: BSSID parsing, formatting and signed arithmetic
//! - **PIN Oracle**: WPS checksum and a catalogue of MAC-derived PIN algorithms
//! - **Anchor Filtering**: drops database PINs already explained by static
//!   values or vendor algorithms
//! - **Inference**: combines nearby anchors with an empirical DeltaMAC →
//!   DeltaPIN table to rank candidate PINs
//! - **Aggregation**: classical, unified and unified1 presentations
//!
//! # Module Structure
//!
//! - `data/` - Records, anchors, candidates and the delta table
//! - `engine/` - Inference and aggregation
//!
//! # Example
//!
//! ```no_run
//! use dp_core::{aggregate, AggregationMode, Bssid, DeltaTable, InferenceEngine,
//!               InferenceOptions, WpsPinGenerator};
//!
//! let table = DeltaTable::load(std::path::Path::new("tenda_deltas.json")).unwrap();
//! let oracle = WpsPinGenerator::new();
//! let target: Bssid = "C8:3A:35:D2:A5:F0".parse().unwrap();
//! let engine = InferenceEngine::new(&table, &oracle);
//! let predictions = engine.infer(&target, &[], InferenceOptions::default()).unwrap();
//! let ranking = aggregate(AggregationMode::Unified, predictions).unwrap();
//! println!("{} candidate PINs", ranking.pin_count());
//! ```

// Grouped modules
pub mod data;
pub mod engine;
pub mod wps;

// Standalone modules
pub mod address;
pub mod constants;
pub mod error;
pub mod matcher;
pub mod source;

pub use address::{increment_mac, int_to_mac, mac_to_int, subtract_macs, Bssid};
pub use data::{
    filter_records, AnchorDelta, AnchorPoint, AnchorPrediction, CandidatePin, DeltaTable,
    FilterOutcome, PinDeltaEntry, RawRecord,
};
pub use engine::{
    aggregate, infer, Aggregation, AggregationMode, InferenceEngine, InferenceOptions,
    PositionScore, RankedPin,
};
pub use error::{DeltaPinError, Result};
pub use matcher::{match_pin, MatchResult};
pub use source::{RecordSource, StaticRecords};
pub use wps::{checksum, parse_pin_core, pin_from_core, Algorithm, GeneratedPin, PinOracle, WpsPinGenerator};
