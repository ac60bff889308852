use crate::error::ExecutorError;
use api_client::{ApiClient, OrderResponse};
use async_trait::async_trait;
use configuration::ExecutionConfig;
use core_types::{InstrumentClass, NormalizedSymbol, OrderRequest, OrderSide, TimeInForce};
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;

/// The price-and-order capability for one instrument class.
///
/// The executor and reconciler only talk to this trait, so their control flow
/// does not branch on equity versus crypto.
#[async_trait]
pub trait InstrumentVenue: Send + Sync {
    fn class(&self) -> InstrumentClass;

    /// Resolves a live reference price. Never returns a non-positive price.
    async fn reference_price(&self, symbol: &NormalizedSymbol) -> Result<Decimal, ExecutorError>;

    /// Converts a dollar amount into an executable quantity at `price`.
    fn quantity_for(&self, amount: Decimal, price: Decimal) -> Decimal;

    /// Smallest quantity the broker accepts for this class.
    fn min_quantity(&self) -> Decimal;

    /// Submits a market order. Success means the broker accepted it, not that it filled.
    async fn submit_market_order(
        &self,
        symbol: &NormalizedSymbol,
        quantity: Decimal,
        side: OrderSide,
    ) -> Result<OrderResponse, ExecutorError>;
}

fn ensure_positive(symbol: &NormalizedSymbol, price: Decimal) -> Result<Decimal, ExecutorError> {
    if price <= Decimal::ZERO {
        return Err(ExecutorError::InvalidPrice {
            symbol: symbol.data_symbol.clone(),
            price,
        });
    }
    Ok(price)
}

async fn submit(
    api_client: &dyn ApiClient,
    symbol: &NormalizedSymbol,
    quantity: Decimal,
    side: OrderSide,
    time_in_force: TimeInForce,
) -> Result<OrderResponse, ExecutorError> {
    let order = OrderRequest::market(&symbol.broker_symbol, side, quantity, time_in_force);
    tracing::debug!(symbol = %order.symbol, %quantity, %side, client_order_id = %order.client_order_id, "Submitting market order.");
    let response = api_client.submit_order(&order).await?;
    tracing::debug!(order_id = %response.id, status = %response.status, "Order accepted.");
    Ok(response)
}

/// Whole-share instruments priced from the latest trade.
pub struct EquityVenue {
    api_client: Arc<dyn ApiClient>,
    time_in_force: TimeInForce,
    min_quantity: Decimal,
}

impl EquityVenue {
    pub fn new(api_client: Arc<dyn ApiClient>, config: &ExecutionConfig) -> Self {
        Self {
            api_client,
            time_in_force: config.time_in_force,
            min_quantity: config.min_equity_quantity,
        }
    }
}

#[async_trait]
impl InstrumentVenue for EquityVenue {
    fn class(&self) -> InstrumentClass {
        InstrumentClass::Equity
    }

    async fn reference_price(&self, symbol: &NormalizedSymbol) -> Result<Decimal, ExecutorError> {
        let trade = self.api_client.get_latest_trade(&symbol.data_symbol).await?;
        ensure_positive(symbol, trade.price)
    }

    /// `floor(amount / price)`: only whole shares are bought.
    fn quantity_for(&self, amount: Decimal, price: Decimal) -> Decimal {
        amount
            .checked_div(price)
            .map(|q| q.floor())
            .unwrap_or(Decimal::ZERO)
    }

    fn min_quantity(&self) -> Decimal {
        self.min_quantity
    }

    async fn submit_market_order(
        &self,
        symbol: &NormalizedSymbol,
        quantity: Decimal,
        side: OrderSide,
    ) -> Result<OrderResponse, ExecutorError> {
        submit(self.api_client.as_ref(), symbol, quantity, side, self.time_in_force).await
    }
}

/// Fractional instruments priced from the most recent short-interval bar.
pub struct CryptoVenue {
    api_client: Arc<dyn ApiClient>,
    time_in_force: TimeInForce,
    quantity_scale: u32,
    min_quantity: Decimal,
}

impl CryptoVenue {
    pub fn new(api_client: Arc<dyn ApiClient>, config: &ExecutionConfig) -> Self {
        Self {
            api_client,
            time_in_force: config.time_in_force,
            quantity_scale: config.crypto_quantity_scale,
            min_quantity: config.min_crypto_quantity,
        }
    }
}

#[async_trait]
impl InstrumentVenue for CryptoVenue {
    fn class(&self) -> InstrumentClass {
        InstrumentClass::Crypto
    }

    async fn reference_price(&self, symbol: &NormalizedSymbol) -> Result<Decimal, ExecutorError> {
        let bar = self.api_client.get_latest_crypto_bar(&symbol.data_symbol).await?;
        ensure_positive(symbol, bar.close)
    }

    /// `amount / price` truncated (never rounded up) to the broker's precision.
    fn quantity_for(&self, amount: Decimal, price: Decimal) -> Decimal {
        amount
            .checked_div(price)
            .map(|q| q.round_dp_with_strategy(self.quantity_scale, RoundingStrategy::ToZero))
            .unwrap_or(Decimal::ZERO)
    }

    fn min_quantity(&self) -> Decimal {
        self.min_quantity
    }

    async fn submit_market_order(
        &self,
        symbol: &NormalizedSymbol,
        quantity: Decimal,
        side: OrderSide,
    ) -> Result<OrderResponse, ExecutorError> {
        submit(self.api_client.as_ref(), symbol, quantity, side, self.time_in_force).await
    }
}

/// One venue per instrument class, selected by `InstrumentClass`.
/// Cloning shares the underlying venues.
#[derive(Clone)]
pub struct Venues {
    equity: Arc<dyn InstrumentVenue>,
    crypto: Arc<dyn InstrumentVenue>,
}

impl Venues {
    pub fn new(equity: Arc<dyn InstrumentVenue>, crypto: Arc<dyn InstrumentVenue>) -> Self {
        Self { equity, crypto }
    }

    /// Both venues backed by the same brokerage client.
    pub fn live(api_client: Arc<dyn ApiClient>, config: &ExecutionConfig) -> Self {
        Self::new(
            Arc::new(EquityVenue::new(Arc::clone(&api_client), config)),
            Arc::new(CryptoVenue::new(api_client, config)),
        )
    }

    pub fn for_class(&self, class: InstrumentClass) -> &dyn InstrumentVenue {
        match class {
            InstrumentClass::Equity => self.equity.as_ref(),
            InstrumentClass::Crypto => self.crypto.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_client::MockApiClient;
    use rust_decimal_macros::dec;

    fn venues() -> Venues {
        Venues::live(Arc::new(MockApiClient::new()), &ExecutionConfig::default())
    }

    #[test]
    fn test_equity_quantity_is_whole_shares() {
        let venues = venues();
        let equity = venues.for_class(InstrumentClass::Equity);
        assert_eq!(equity.quantity_for(dec!(500), dec!(189.99)), dec!(2));
        assert_eq!(equity.quantity_for(dec!(166.67), dec!(400)), dec!(0));
    }

    #[test]
    fn test_crypto_quantity_is_truncated_fraction() {
        let venues = venues();
        let crypto = venues.for_class(InstrumentClass::Crypto);
        assert_eq!(crypto.class(), InstrumentClass::Crypto);
        // 100 / 64000 = 0.0015625 exactly.
        assert_eq!(crypto.quantity_for(dec!(100), dec!(64000)), dec!(0.0015625));
        // 1 / 3 truncates at nine places instead of rounding.
        assert_eq!(crypto.quantity_for(dec!(1), dec!(3)), dec!(0.333333333));
    }

    #[test]
    fn test_zero_price_never_divides() {
        let venues = venues();
        let equity = venues.for_class(InstrumentClass::Equity);
        assert_eq!(equity.quantity_for(dec!(100), Decimal::ZERO), Decimal::ZERO);
    }
}
