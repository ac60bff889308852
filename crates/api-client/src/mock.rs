//! In-memory `ApiClient` for tests. Enabled with the `test-utils` feature.

use crate::error::ApiError;
use crate::responses::{AccountResponse, Bar, LatestTrade, OrderResponse, PositionResponse};
use crate::ApiClient;
use async_trait::async_trait;
use chrono::Utc;
use core_types::OrderRequest;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Mutex;

/// A scripted broker. Prices, positions and rejections are configured up front;
/// every call and every accepted order is recorded for assertions.
#[derive(Default)]
pub struct MockApiClient {
    positions: Vec<PositionResponse>,
    positions_error: Option<String>,
    trade_prices: HashMap<String, Decimal>,
    bar_closes: HashMap<String, Decimal>,
    rejections: HashMap<String, String>,
    submitted: Mutex<Vec<OrderRequest>>,
    calls: Mutex<Vec<String>>,
}

impl MockApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, symbol: &str, qty: Decimal) -> Self {
        self.positions.push(PositionResponse {
            symbol: symbol.to_string(),
            qty,
            asset_class: String::new(),
            side: "long".to_string(),
            market_value: None,
        });
        self
    }

    /// Makes `list_positions` fail with the given message.
    pub fn with_positions_error(mut self, message: &str) -> Self {
        self.positions_error = Some(message.to_string());
        self
    }

    pub fn with_trade_price(mut self, symbol: &str, price: Decimal) -> Self {
        self.trade_prices.insert(symbol.to_string(), price);
        self
    }

    pub fn with_bar_close(mut self, symbol: &str, close: Decimal) -> Self {
        self.bar_closes.insert(symbol.to_string(), close);
        self
    }

    /// Makes `submit_order` reject any order for `symbol` with `message`.
    pub fn rejecting_orders_for(mut self, symbol: &str, message: &str) -> Self {
        self.rejections.insert(symbol.to_string(), message.to_string());
        self
    }

    /// Orders accepted so far, in submission order.
    pub fn submitted_orders(&self) -> Vec<OrderRequest> {
        self.submitted.lock().expect("mock mutex poisoned").clone()
    }

    /// Every call made against the mock, e.g. `"latest_trade:AAPL"`, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("mock mutex poisoned").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("mock mutex poisoned").push(call);
    }
}

#[async_trait]
impl ApiClient for MockApiClient {
    async fn get_account(&self) -> Result<AccountResponse, ApiError> {
        self.record("account".to_string());
        Ok(AccountResponse {
            id: "mock-account".to_string(),
            account_number: "PA0000000".to_string(),
            status: "ACTIVE".to_string(),
            currency: "USD".to_string(),
            buying_power: Decimal::from(100_000),
            cash: Decimal::from(100_000),
        })
    }

    async fn list_positions(&self) -> Result<Vec<PositionResponse>, ApiError> {
        self.record("positions".to_string());
        match &self.positions_error {
            Some(message) => Err(ApiError::ApiError {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(self.positions.clone()),
        }
    }

    async fn get_latest_trade(&self, symbol: &str) -> Result<LatestTrade, ApiError> {
        self.record(format!("latest_trade:{}", symbol));
        let price = self
            .trade_prices
            .get(symbol)
            .copied()
            .ok_or_else(|| ApiError::NoMarketData(symbol.to_string()))?;
        Ok(LatestTrade {
            timestamp: Utc::now(),
            price,
            size: Decimal::ONE,
        })
    }

    async fn get_latest_crypto_bar(&self, symbol: &str) -> Result<Bar, ApiError> {
        self.record(format!("latest_bar:{}", symbol));
        let close = self
            .bar_closes
            .get(symbol)
            .copied()
            .ok_or_else(|| ApiError::NoMarketData(symbol.to_string()))?;
        Ok(Bar {
            timestamp: Utc::now(),
            open: close,
            high: close,
            low: close,
            close,
            volume: Decimal::ONE,
        })
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderResponse, ApiError> {
        self.record(format!("order:{}:{}", order.side, order.symbol));
        if let Some(message) = self.rejections.get(&order.symbol) {
            return Err(ApiError::ApiError {
                status: 403,
                message: message.clone(),
            });
        }
        self.submitted
            .lock()
            .expect("mock mutex poisoned")
            .push(order.clone());
        Ok(OrderResponse {
            id: format!("mock-{}", order.client_order_id),
            client_order_id: order.client_order_id.to_string(),
            symbol: order.symbol.clone(),
            qty: Some(order.quantity),
            side: order.side,
            order_type: "market".to_string(),
            time_in_force: "gtc".to_string(),
            status: "accepted".to_string(),
        })
    }
}
