use crate::enums::{OrderSide, OrderType, TimeInForce};
use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A single buy or avoid call produced by the upstream recommender.
///
/// The recommender has emitted the ticker under both `tickerSymbol` and
/// `stockTicker`; both are accepted. A blank ticker deserializes as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(default)]
    pub company_name: String,
    #[serde(default, alias = "stockTicker", deserialize_with = "blank_as_none")]
    pub ticker_symbol: Option<String>,
    #[serde(default)]
    pub reasoning: String,
}

impl Recommendation {
    pub fn new(company_name: &str, ticker_symbol: Option<&str>, reasoning: &str) -> Self {
        Self {
            company_name: company_name.to_string(),
            ticker_symbol: ticker_symbol
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            reasoning: reasoning.to_string(),
        }
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// The ranked buy list and the avoid list for one analysis.
/// `stocks_to_invest[0]` is the recommender's highest-priority pick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentAnalysis {
    #[serde(default)]
    pub stocks_to_invest: Vec<Recommendation>,
    #[serde(default)]
    pub stocks_to_avoid: Vec<Recommendation>,
}

impl InvestmentAnalysis {
    /// Parses a recommender payload, either wrapped as
    /// `{"investmentAnalysis": {...}}` or given bare.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        RecommendationPayload::from_json(text).map(|payload| payload.analysis)
    }

    pub fn is_empty(&self) -> bool {
        self.stocks_to_invest.is_empty() && self.stocks_to_avoid.is_empty()
    }
}

/// A recommender payload in two forms: the typed analysis the pipeline trades
/// on, and the analysis object exactly as the recommender sent it.
///
/// `raw` keeps the original keys (`stockTicker`), blank tickers and any extra
/// fields so it can be handed back to the caller untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationPayload {
    pub analysis: InvestmentAnalysis,
    pub raw: serde_json::Value,
}

impl RecommendationPayload {
    /// Parses a payload, unwrapping `{"investmentAnalysis": {...}}` when present.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let mut value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| CoreError::Payload(e.to_string()))?;
        let raw = match value.get_mut("investmentAnalysis") {
            Some(inner) if inner.is_object() => inner.take(),
            _ => value,
        };
        let analysis =
            InvestmentAnalysis::deserialize(&raw).map_err(|e| CoreError::Payload(e.to_string()))?;
        Ok(Self { analysis, raw })
    }
}

impl From<InvestmentAnalysis> for RecommendationPayload {
    /// Analyses built in code have no original text; `raw` is their canonical form.
    fn from(analysis: InvestmentAnalysis) -> Self {
        let raw = serde_json::to_value(&analysis).unwrap_or_default();
        Self { analysis, raw }
    }
}

/// A live holding as reported by the broker. Read-only for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub quantity: Decimal,
}

/// The dollar amount assigned to one buy recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// 0-indexed position in the recommender's buy list.
    pub rank: usize,
    pub weight: u32,
    pub company_name: String,
    pub ticker: Option<String>,
    pub dollar_amount: Decimal,
}

/// A request to place an order with the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub client_order_id: Uuid,
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
    pub quantity: Decimal,
}

impl OrderRequest {
    /// Builds a market order with a fresh client order id.
    pub fn market(symbol: &str, side: OrderSide, quantity: Decimal, time_in_force: TimeInForce) -> Self {
        Self {
            client_order_id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            side,
            order_type: OrderType::Market,
            time_in_force,
            quantity,
        }
    }
}
