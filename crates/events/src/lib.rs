//! # Trade Outcome Events
//!
//! This crate defines the structured record of every trade action a pipeline
//! run attempts, and the ordered log that collects them.
//!
//! As a Layer 0 crate, it depends only on `core-types`. "What happened" lives
//! in `TradeOutcome`; "how it is shown" lives in its `Display` impl.

// Declare the modules that make up this crate.
pub mod outcome;
pub mod trade_log;

// Re-export the core types to provide a clean public API.
pub use outcome::{LogLevel, OutcomeKind, SkipReason, TradeOutcome};
pub use trade_log::TradeLog;
