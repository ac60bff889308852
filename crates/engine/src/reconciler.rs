use api_client::ApiClient;
use core_types::{OrderSide, Position, Recommendation, SymbolNormalizer};
use events::{TradeLog, TradeOutcome};
use executor::Venues;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

/// Liquidates held positions for every "avoid" recommendation.
///
/// The position snapshot is fetched once per run. If that fetch fails the
/// whole phase collapses into a single `Warning`; the buy phase still runs.
pub struct PositionReconciler {
    /// Source of the live position snapshot.
    api_client: Arc<dyn ApiClient>,
    /// Sell orders go through the same venues as buys.
    venues: Venues,
    normalizer: SymbolNormalizer,
}

impl PositionReconciler {
    pub fn new(api_client: Arc<dyn ApiClient>, venues: Venues, normalizer: SymbolNormalizer) -> Self {
        Self {
            api_client,
            venues,
            normalizer,
        }
    }

    /// Sells the full held quantity of each avoid ticker, in list order.
    ///
    /// Tickers that are not held (or held at zero) produce no entry at all.
    pub async fn reconcile(&self, avoid: &[Recommendation]) -> TradeLog {
        let mut log = TradeLog::new();

        // 1. Snapshot, fetched exactly once.
        let positions = match self.api_client.list_positions().await {
            Ok(positions) => positions.into_iter().map(Position::from),
            Err(e) => {
                log.record(TradeOutcome::Warning {
                    message: e.to_string(),
                });
                return log;
            }
        };

        // Keyed by broker form so `BTC/USD` and `BTCUSD` meet.
        let mut held: HashMap<String, Decimal> = HashMap::new();
        for position in positions {
            let key = self.normalizer.broker_symbol(&position.symbol);
            *held.entry(key).or_insert(Decimal::ZERO) += position.quantity;
        }
        tracing::debug!(positions = held.len(), avoid = avoid.len(), "Reconciling avoid list.");

        // 2. One full-quantity sell per held avoid ticker.
        for recommendation in avoid {
            let Some(ticker) = recommendation.ticker_symbol.as_deref() else {
                continue;
            };
            let symbol = self.normalizer.normalize(ticker);

            // Removing the entry means a repeated avoid ticker is not sold twice.
            let quantity = match held.remove(&symbol.broker_symbol) {
                Some(quantity) if quantity > Decimal::ZERO => quantity,
                _ => continue,
            };

            let venue = self.venues.for_class(symbol.class);
            let outcome = match venue.submit_market_order(&symbol, quantity, OrderSide::Sell).await {
                Ok(_) => TradeOutcome::Sold {
                    symbol: symbol.broker_symbol,
                    quantity,
                    class: symbol.class,
                },
                Err(e) => TradeOutcome::Failed {
                    symbol: symbol.broker_symbol,
                    side: OrderSide::Sell,
                    error: e.to_string(),
                },
            };
            log.record(outcome);
        }

        log
    }
}
