use crate::auth::auth_headers;
use crate::error::ApiError;
use async_trait::async_trait;
use configuration::{BrokerConfig, Credentials};
use core_types::{OrderRequest, OrderSide, OrderType, TimeInForce};
use serde::{Serialize, de::DeserializeOwned};

mod auth;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod responses;
// --- Public API ---
pub use responses::{
    AccountResponse, ApiErrorResponse, Bar, LatestTrade, OrderResponse, PositionResponse,
};
#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockApiClient;

/// The generic, abstract interface for a brokerage and its market data.
/// This trait is the contract the pipeline uses, allowing the underlying
/// implementation (live or mock) to be swapped out.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Fetches the trading account. (Authenticated)
    async fn get_account(&self) -> Result<AccountResponse, ApiError>;

    /// Fetches all current open positions. (Authenticated)
    async fn list_positions(&self) -> Result<Vec<PositionResponse>, ApiError>;

    /// Fetches the latest trade for an equity symbol.
    async fn get_latest_trade(&self, symbol: &str) -> Result<LatestTrade, ApiError>;

    /// Fetches the most recent one-minute bar for a crypto pair such as `BTC/USD`.
    async fn get_latest_crypto_bar(&self, symbol: &str) -> Result<Bar, ApiError>;

    /// Submits a new order. Acceptance is not a fill. (Authenticated)
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderResponse, ApiError>;
}

/// JSON body of `POST /v2/orders`.
#[derive(Debug, Serialize)]
struct OrderPayload<'a> {
    symbol: &'a str,
    qty: String,
    side: OrderSide,
    #[serde(rename = "type")]
    order_type: OrderType,
    time_in_force: TimeInForce,
    client_order_id: String,
}

impl<'a> From<&'a OrderRequest> for OrderPayload<'a> {
    fn from(order: &'a OrderRequest) -> Self {
        Self {
            symbol: &order.symbol,
            qty: order.quantity.normalize().to_string(),
            side: order.side,
            order_type: order.order_type,
            time_in_force: order.time_in_force,
            client_order_id: order.client_order_id.to_string(),
        }
    }
}

/// A concrete implementation of the `ApiClient` for the Alpaca REST API.
///
/// One client is built per pipeline run from that run's credentials.
#[derive(Clone)]
pub struct AlpacaClient {
    client: reqwest::Client,
    trading_url: String,
    data_url: String,
    crypto_feed: String,
}

impl AlpacaClient {
    pub fn new(broker: &BrokerConfig, credentials: &Credentials) -> Result<Self, ApiError> {
        let (key_id, secret_key) = credentials
            .require()
            .map_err(|e| ApiError::Credentials(e.to_string()))?;

        let client = reqwest::Client::builder()
            .default_headers(auth_headers(key_id, secret_key)?)
            .build()?;

        Ok(Self {
            client,
            trading_url: broker.trading_url.trim_end_matches('/').to_string(),
            data_url: broker.data_url.trim_end_matches('/').to_string(),
            crypto_feed: broker.crypto_feed.clone(),
        })
    }

    async fn _get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).query(query).send().await?;
        Self::decode(response).await
    }

    async fn _post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str::<T>(&text).map_err(|e| ApiError::Deserialization(e.to_string()))
        } else {
            // Error bodies are usually `{"code": ..., "message": ...}` but gateways
            // in front of the API can return plain text.
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|body| body.message)
                .unwrap_or(text);
            Err(ApiError::ApiError {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ApiClient for AlpacaClient {
    async fn get_account(&self) -> Result<AccountResponse, ApiError> {
        let url = format!("{}/v2/account", self.trading_url);
        self._get(&url, &[]).await
    }

    async fn list_positions(&self) -> Result<Vec<PositionResponse>, ApiError> {
        let url = format!("{}/v2/positions", self.trading_url);
        self._get(&url, &[]).await
    }

    async fn get_latest_trade(&self, symbol: &str) -> Result<LatestTrade, ApiError> {
        let url = format!("{}/v2/stocks/{}/trades/latest", self.data_url, symbol);
        let response: responses::LatestTradeResponse = self._get(&url, &[]).await?;
        Ok(response.trade)
    }

    async fn get_latest_crypto_bar(&self, symbol: &str) -> Result<Bar, ApiError> {
        let url = format!(
            "{}/v1beta3/crypto/{}/latest/bars",
            self.data_url, self.crypto_feed
        );
        let mut response: responses::LatestBarsResponse =
            self._get(&url, &[("symbols", symbol)]).await?;
        response
            .bars
            .remove(symbol)
            .ok_or_else(|| ApiError::NoMarketData(symbol.to_string()))
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderResponse, ApiError> {
        let url = format!("{}/v2/orders", self.trading_url);
        self._post(&url, &OrderPayload::from(order)).await
    }
}
