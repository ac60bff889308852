//! # Order Executor Crate
//!
//! This crate turns dollar allocations into broker orders. It defines the
//! `InstrumentVenue` capability (price lookup, sizing and order submission for
//! one instrument class) with an equity and a crypto implementation, and the
//! `OrderExecutor` that walks an allocation list through them.
//!
//! ## Architectural Principles
//!
//! - **Instrument Abstraction:** The executor never branches on equity versus
//!   crypto. It normalizes the ticker, asks `Venues` for the matching
//!   `InstrumentVenue`, and runs the same steps for both.
//! - **Failure Isolation:** Every allocation ends in exactly one `TradeOutcome`.
//!   Lookup and submission errors become `Failed` outcomes; nothing propagates
//!   out of `OrderExecutor::execute`.
//!
//! ## Public API
//!
//! - `InstrumentVenue`, `EquityVenue`, `CryptoVenue`, `Venues`
//! - `OrderExecutor`: sequential buy-phase processing.
//! - `BuyState`, `InstrumentTracker`: the per-instrument lifecycle.
//! - `ExecutorError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod order_executor;
pub mod state;
pub mod venue;

// Re-export the key components to provide a clean, public-facing API.
pub use error::ExecutorError;
pub use order_executor::OrderExecutor;
pub use state::{BuyState, InstrumentTracker};
pub use venue::{CryptoVenue, EquityVenue, InstrumentVenue, Venues};
