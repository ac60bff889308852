pub mod enums;
pub mod error;
pub mod structs;
pub mod symbol;

// Re-export the core types to provide a clean public API.
pub use enums::{InstrumentClass, OrderSide, OrderType, TimeInForce};
pub use error::CoreError;
pub use structs::{
    Allocation, InvestmentAnalysis, OrderRequest, Position, Recommendation, RecommendationPayload,
};
pub use symbol::{NormalizedSymbol, SymbolConvention, SymbolNormalizer};
