//! # Engine Crate
//!
//! Orchestrates one recommendation-to-order run: liquidate held "avoid"
//! positions, allocate the budget across the buy list by rank, and submit the
//! buys. The result is a `PipelineReport` holding the analysis and the ordered
//! trade log.

pub mod error;
pub mod pipeline;
pub mod reconciler;
pub mod source;

pub use error::EngineError;
pub use pipeline::{PipelineReport, RunRequest, TradePipeline};
pub use reconciler::PositionReconciler;
pub use source::{JsonFileSource, RecommendationSource};
