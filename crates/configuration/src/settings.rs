use crate::error::ConfigError;
use core_types::{SymbolConvention, TimeInForce};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty or missing `config.toml` yields a
/// working paper-trading setup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub broker: BrokerConfig,
    pub symbols: SymbolConvention,
    pub execution: ExecutionConfig,
    pub logging: LoggingConfig,
}

/// Endpoints of the brokerage and its market-data service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Trading API root (accounts, positions, orders).
    pub trading_url: String,
    /// Market data API root (latest trades, bars).
    pub data_url: String,
    /// Crypto market-data location segment, e.g. `us`.
    pub crypto_feed: String,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            trading_url: "https://paper-api.alpaca.markets".to_string(),
            data_url: "https://data.alpaca.markets".to_string(),
            crypto_feed: "us".to_string(),
        }
    }
}

/// Order and quantity rules applied by the executor and reconciler.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    pub time_in_force: TimeInForce,
    /// Decimal places kept when truncating a fractional crypto quantity.
    pub crypto_quantity_scale: u32,
    /// Smallest crypto quantity the broker accepts.
    pub min_crypto_quantity: Decimal,
    /// Smallest equity quantity the broker accepts (whole shares).
    pub min_equity_quantity: Decimal,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            time_in_force: TimeInForce::Gtc,
            crypto_quantity_scale: 9,
            min_crypto_quantity: dec!(0.000000001),
            min_equity_quantity: dec!(1),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Rejects settings that would make every order or lookup fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.broker.trading_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "broker.trading_url must not be empty".to_string(),
            ));
        }
        if self.broker.data_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "broker.data_url must not be empty".to_string(),
            ));
        }
        if self.symbols.separator.is_empty() && !self.symbols.match_unseparated {
            return Err(ConfigError::ValidationError(
                "symbols.separator must not be empty unless symbols.match_unseparated is set"
                    .to_string(),
            ));
        }
        if self.symbols.crypto_quotes.iter().all(|q| q.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "symbols.crypto_quotes must list at least one quote currency".to_string(),
            ));
        }
        if self.execution.min_crypto_quantity <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "execution.min_crypto_quantity must be greater than 0".to_string(),
            ));
        }
        if self.execution.min_equity_quantity <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "execution.min_equity_quantity must be greater than 0".to_string(),
            ));
        }
        if self.execution.crypto_quantity_scale > 18 {
            return Err(ConfigError::ValidationError(
                "execution.crypto_quantity_scale must be at most 18".to_string(),
            ));
        }
        Ok(())
    }
}
