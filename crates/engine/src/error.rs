use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that abort a run before any brokerage action is taken.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] configuration::error::ConfigError),

    #[error("API client error: {0}")]
    ApiClient(#[from] api_client::error::ApiError),

    #[error("Allocation error: {0}")]
    Allocation(#[from] risk::AllocationError),

    #[error("Investment amount must be a positive number, got '{0}'")]
    InvalidAmount(String),

    #[error("Recommendation source failed: {0}")]
    Source(String),

    #[error("Could not parse recommendations: {0}")]
    Payload(#[from] core_types::CoreError),
}

impl EngineError {
    pub(crate) fn invalid_amount(amount: Decimal) -> Self {
        EngineError::InvalidAmount(amount.to_string())
    }
}
