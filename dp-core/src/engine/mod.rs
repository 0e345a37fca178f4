//! PIN inference engine modules
//!
//! Contains the delta inference algorithm and the result aggregators.

mod aggregate;
mod inference;

pub use aggregate::{aggregate, Aggregation, AggregationMode, PositionScore, RankedPin};
pub use inference::{infer, InferenceEngine, InferenceOptions};
