use chrono::{DateTime, Utc};
use core_types::{OrderSide, Position};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

// The trading API uses snake_case keys, so most structs map field-for-field.
// Market-data payloads use single-letter keys and are renamed explicitly.

/// The response from `GET /v2/account`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub currency: String,
    pub buying_power: Decimal,
    #[serde(default)]
    pub cash: Decimal,
}

/// A single open position from `GET /v2/positions`.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionResponse {
    pub symbol: String,
    pub qty: Decimal,
    #[serde(default)]
    pub asset_class: String,
    #[serde(default)]
    pub side: String,
    #[serde(default)]
    pub market_value: Option<Decimal>,
}

impl From<PositionResponse> for Position {
    fn from(response: PositionResponse) -> Self {
        Position {
            symbol: response.symbol,
            quantity: response.qty,
        }
    }
}

/// The response from `GET /v2/stocks/{symbol}/trades/latest`.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestTradeResponse {
    pub symbol: String,
    pub trade: LatestTrade,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatestTrade {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "p")]
    pub price: Decimal,
    #[serde(rename = "s")]
    pub size: Decimal,
}

/// The response from `GET /v1beta3/crypto/{loc}/latest/bars`, keyed by pair.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestBarsResponse {
    #[serde(default)]
    pub bars: HashMap<String, Bar>,
}

/// One OHLCV bar (one-minute interval for the latest-bar endpoint).
#[derive(Debug, Clone, Deserialize)]
pub struct Bar {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "o")]
    pub open: Decimal,
    #[serde(rename = "h")]
    pub high: Decimal,
    #[serde(rename = "l")]
    pub low: Decimal,
    #[serde(rename = "c")]
    pub close: Decimal,
    #[serde(rename = "v")]
    pub volume: Decimal,
}

/// The response from a successful `POST /v2/orders` request.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub client_order_id: String,
    pub symbol: String,
    #[serde(default)]
    pub qty: Option<Decimal>,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: String,
    pub time_in_force: String,
    pub status: String,
    // There are more fields, but these are the most important for us.
}

/// Represents an error response from the brokerage API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
}
