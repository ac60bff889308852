use crate::state::{BuyState, InstrumentTracker};
use crate::venue::Venues;
use core_types::{Allocation, OrderSide, SymbolNormalizer};
use events::{SkipReason, TradeLog, TradeOutcome};

/// Turns allocations into buy orders, one instrument at a time.
///
/// Every allocation produces exactly one outcome. A failure for one instrument
/// is recorded and the next allocation is still attempted.
pub struct OrderExecutor {
    venues: Venues,
    normalizer: SymbolNormalizer,
}

impl OrderExecutor {
    pub fn new(venues: Venues, normalizer: SymbolNormalizer) -> Self {
        Self { venues, normalizer }
    }

    /// Processes allocations strictly in order and returns their outcomes in that order.
    pub async fn execute(&self, allocations: &[Allocation]) -> TradeLog {
        let mut log = TradeLog::new();
        for allocation in allocations {
            log.record(self.execute_allocation(allocation).await);
        }
        log
    }

    /// Runs a single allocation through price lookup, sizing and submission.
    pub async fn execute_allocation(&self, allocation: &Allocation) -> TradeOutcome {
        let Some(ticker) = allocation.ticker.as_deref() else {
            return TradeOutcome::missing_ticker(&allocation.company_name);
        };

        let symbol = self.normalizer.normalize(ticker);
        let venue = self.venues.for_class(symbol.class);
        let mut tracker = InstrumentTracker::new(&symbol.data_symbol);

        // 1. Reference price.
        let price = match venue.reference_price(&symbol).await {
            Ok(price) => price,
            Err(e) => {
                tracker.advance(BuyState::Failed);
                return TradeOutcome::Failed {
                    symbol: symbol.data_symbol,
                    side: OrderSide::Buy,
                    error: e.to_string(),
                };
            }
        };
        tracker.advance(BuyState::PendingSubmission);

        // 2. Executable quantity.
        let quantity = venue.quantity_for(allocation.dollar_amount, price);
        tracing::debug!(symbol = %symbol.data_symbol, class = ?symbol.class, %price, amount = %allocation.dollar_amount, %quantity, "Sized allocation.");

        if quantity <= rust_decimal::Decimal::ZERO || quantity < venue.min_quantity() {
            tracker.advance(BuyState::Skipped);
            return TradeOutcome::Skipped {
                symbol: Some(symbol.data_symbol),
                reason: SkipReason::InsufficientAllocation {
                    amount: allocation.dollar_amount,
                    price,
                    class: symbol.class,
                },
            };
        }

        // 3. Submission.
        match venue.submit_market_order(&symbol, quantity, OrderSide::Buy).await {
            Ok(_) => {
                tracker.advance(BuyState::Submitted);
                TradeOutcome::Bought {
                    symbol: symbol.data_symbol,
                    quantity,
                    price,
                    class: symbol.class,
                }
            }
            Err(e) => {
                tracker.advance(BuyState::Failed);
                TradeOutcome::Failed {
                    symbol: symbol.data_symbol,
                    side: OrderSide::Buy,
                    error: e.to_string(),
                }
            }
        }
    }
}
