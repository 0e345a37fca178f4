//! Data types, delta table and anchor selection
//!
//! Contains the core data structures that flow through the engine.

mod anchors;
mod delta_table;
mod types;

pub use anchors::{filter_records, FilterOutcome};
pub use delta_table::DeltaTable;
pub use types::{
    AnchorDelta, AnchorPoint, AnchorPrediction, CandidatePin, PinDeltaEntry, RawRecord,
};
