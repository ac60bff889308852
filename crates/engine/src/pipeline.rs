use crate::error::EngineError;
use crate::reconciler::PositionReconciler;
use crate::source::RecommendationSource;
use api_client::{AccountResponse, AlpacaClient, ApiClient};
use configuration::{Config, Credentials};
use core_types::{Allocation, InvestmentAnalysis, RecommendationPayload, SymbolNormalizer};
use events::{OutcomeKind, TradeLog, TradeOutcome};
use executor::{OrderExecutor, Venues};
use risk::{Allocator, RankWeightedAllocator};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// Everything one run needs from its caller.
///
/// Credentials travel with the request; a pipeline never reads them from
/// shared state, so concurrent runs cannot see each other's keys.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub credentials: Credentials,
    pub amount: Decimal,
}

impl RunRequest {
    pub fn new(credentials: Credentials, amount: Decimal) -> Self {
        Self { credentials, amount }
    }

    /// Builds a request from a raw amount string and validates it.
    pub fn parse(credentials: Credentials, amount: &str) -> Result<Self, EngineError> {
        let amount: Decimal = amount
            .trim()
            .parse()
            .map_err(|_| EngineError::InvalidAmount(amount.to_string()))?;
        let request = Self::new(credentials, amount);
        request.validate()?;
        Ok(request)
    }

    /// Both credential halves present and a positive amount.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.credentials.require()?;
        if self.amount <= Decimal::ZERO {
            return Err(EngineError::invalid_amount(self.amount));
        }
        Ok(())
    }
}

/// The result of one run: the analysis it acted on and every outcome, in order.
///
/// Serializes as `{"analysis": {...}, "trade_log": ["...", ...]}` where
/// `analysis` is the recommender's object exactly as received.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub analysis: serde_json::Value,
    #[serde(skip)]
    pub recommendations: InvestmentAnalysis,
    #[serde(rename = "trade_log", serialize_with = "rendered")]
    pub outcomes: TradeLog,
}

fn rendered<S: Serializer>(log: &TradeLog, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(log.render())
}

impl PipelineReport {
    pub fn trade_log(&self) -> Vec<String> {
        self.outcomes.render()
    }
}

/// Recommendation-to-order orchestration.
///
/// Reconciliation finishes before any buy is attempted and buys run one
/// allocation at a time. Once the run has started, every failure ends up in
/// the returned log instead of an `Err`.
pub struct TradePipeline {
    config: Config,
    allocator: Box<dyn Allocator>,
}

impl TradePipeline {
    pub fn new(config: Config) -> Self {
        Self::with_allocator(config, Box::new(RankWeightedAllocator::new()))
    }

    pub fn with_allocator(config: Config, allocator: Box<dyn Allocator>) -> Self {
        Self { config, allocator }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Computes the buy-list allocation without contacting the broker.
    pub fn plan(
        &self,
        analysis: &InvestmentAnalysis,
        amount: Decimal,
    ) -> Result<Vec<Allocation>, EngineError> {
        if amount <= Decimal::ZERO {
            return Err(EngineError::invalid_amount(amount));
        }
        Ok(self.allocator.allocate(&analysis.stocks_to_invest, amount)?)
    }

    /// Fetches the brokerage account to prove the credentials work.
    pub async fn check_account(&self, credentials: &Credentials) -> Result<AccountResponse, EngineError> {
        let api_client = AlpacaClient::new(&self.config.broker, credentials)?;
        let account = api_client.get_account().await?;
        tracing::info!(account_id = %account.id, status = %account.status, "Credentials accepted.");
        Ok(account)
    }

    /// Validates the request, loads the recommendations, and trades them with
    /// a brokerage client built from the request's own credentials.
    pub async fn run(
        &self,
        request: &RunRequest,
        source: &dyn RecommendationSource,
    ) -> Result<PipelineReport, EngineError> {
        request.validate()?;
        let payload = source.fetch().await?;
        let api_client = AlpacaClient::new(&self.config.broker, &request.credentials)?;
        self.run_with_client(Arc::new(api_client), payload, request.amount)
            .await
    }

    /// Runs reconciliation then the buy phase against `api_client`.
    ///
    /// Only a bad amount can fail, and that is checked before any broker call.
    pub async fn run_with_client(
        &self,
        api_client: Arc<dyn ApiClient>,
        payload: impl Into<RecommendationPayload>,
        amount: Decimal,
    ) -> Result<PipelineReport, EngineError> {
        let RecommendationPayload { analysis, raw } = payload.into();
        let allocations = self.plan(&analysis, amount)?;

        let venues = Venues::live(Arc::clone(&api_client), &self.config.execution);
        let normalizer = SymbolNormalizer::new(self.config.symbols.clone());

        // --- 1. Sell phase ---
        let reconciler = PositionReconciler::new(api_client, venues.clone(), normalizer.clone());
        let mut log = reconciler.reconcile(&analysis.stocks_to_avoid).await;

        // --- 2. Buy phase ---
        if allocations.is_empty() {
            log.record(TradeOutcome::no_buy_recommendations());
        } else {
            let executor = OrderExecutor::new(venues, normalizer);
            log.append(executor.execute(&allocations).await);
        }

        tracing::info!(
            sold = log.count(OutcomeKind::Sold),
            bought = log.count(OutcomeKind::Bought),
            skipped = log.count(OutcomeKind::Skipped),
            failed = log.count(OutcomeKind::Failed),
            warnings = log.count(OutcomeKind::Warning),
            "Pipeline run complete."
        );

        Ok(PipelineReport {
            analysis: raw,
            recommendations: analysis,
            outcomes: log,
        })
    }
}
