//! Budget allocation across a ranked buy list.

use core_types::{Allocation, Recommendation};
use rust_decimal::Decimal;

pub mod allocation;
pub mod error;

pub use allocation::{RankWeightedAllocator, rank_weights};
pub use error::AllocationError;

/// Splits an investment amount across an ordered list of buy recommendations.
pub trait Allocator: Send + Sync {
    /// Returns one allocation per recommendation, in input order.
    /// An empty buy list yields an empty allocation list.
    fn allocate(
        &self,
        buy_list: &[Recommendation],
        amount: Decimal,
    ) -> Result<Vec<Allocation>, AllocationError>;
}
