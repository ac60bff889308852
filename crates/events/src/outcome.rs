use core_types::{InstrumentClass, OrderSide};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Enum representing the severity of an outcome for structured logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// Discriminant of a `TradeOutcome`, handy for counting and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeKind {
    Sold,
    Bought,
    Skipped,
    Failed,
    Warning,
}

/// Why an instrument was deliberately not traded. Informational, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The recommendation carried no ticker to trade.
    MissingTicker { company_name: String },
    /// The allocation buys less than the minimum tradable quantity.
    InsufficientAllocation {
        amount: Decimal,
        price: Decimal,
        class: InstrumentClass,
    },
    /// The buy list was empty.
    NoBuyRecommendations,
}

/// One structured record of what happened to a single trade action.
///
/// Rendering to text is a separate step (`Display`), so callers can inspect
/// outcomes without parsing strings.
///
/// The `#[serde(tag = "type", content = "payload")]` attribute serializes
/// a `Sold` outcome as `{"type": "Sold", "payload": {"symbol": ..., ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum TradeOutcome {
    /// A held "avoid" position was liquidated in full.
    Sold {
        symbol: String,
        quantity: Decimal,
        class: InstrumentClass,
    },
    /// A buy order was accepted by the broker (not necessarily filled).
    Bought {
        symbol: String,
        quantity: Decimal,
        price: Decimal,
        class: InstrumentClass,
    },
    Skipped {
        symbol: Option<String>,
        reason: SkipReason,
    },
    /// A price lookup or order submission failed for one instrument.
    Failed {
        symbol: String,
        side: OrderSide,
        error: String,
    },
    /// The liquidation phase could not run at all.
    Warning { message: String },
}

impl TradeOutcome {
    pub fn no_buy_recommendations() -> Self {
        TradeOutcome::Skipped {
            symbol: None,
            reason: SkipReason::NoBuyRecommendations,
        }
    }

    pub fn missing_ticker(company_name: &str) -> Self {
        TradeOutcome::Skipped {
            symbol: None,
            reason: SkipReason::MissingTicker {
                company_name: company_name.to_string(),
            },
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            TradeOutcome::Sold { .. } => OutcomeKind::Sold,
            TradeOutcome::Bought { .. } => OutcomeKind::Bought,
            TradeOutcome::Skipped { .. } => OutcomeKind::Skipped,
            TradeOutcome::Failed { .. } => OutcomeKind::Failed,
            TradeOutcome::Warning { .. } => OutcomeKind::Warning,
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        match self {
            TradeOutcome::Sold { symbol, .. }
            | TradeOutcome::Bought { symbol, .. }
            | TradeOutcome::Failed { symbol, .. } => Some(symbol),
            TradeOutcome::Skipped { symbol, .. } => symbol.as_deref(),
            TradeOutcome::Warning { .. } => None,
        }
    }

    pub fn level(&self) -> LogLevel {
        match self {
            TradeOutcome::Sold { .. } | TradeOutcome::Bought { .. } | TradeOutcome::Skipped { .. } => {
                LogLevel::Info
            }
            TradeOutcome::Warning { .. } => LogLevel::Warn,
            TradeOutcome::Failed { .. } => LogLevel::Error,
        }
    }

    /// The human-readable log line for this outcome.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

fn money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

impl fmt::Display for TradeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeOutcome::Sold {
                symbol,
                quantity,
                class,
            } => write!(
                f,
                "✅ SOLD all {} {} of {}.",
                quantity.normalize(),
                class.unit_label(),
                symbol
            ),
            TradeOutcome::Bought {
                symbol,
                quantity,
                price,
                class,
            } => write!(
                f,
                "✅ BOUGHT {} {} of {} at ~${} each.",
                quantity.normalize(),
                class.unit_label(),
                symbol,
                money(*price)
            ),
            TradeOutcome::Skipped { symbol, reason } => match reason {
                SkipReason::MissingTicker { company_name } => {
                    write!(f, "ℹ️ SKIPPED: No stock ticker provided for {}.", company_name)
                }
                SkipReason::InsufficientAllocation {
                    amount,
                    price,
                    class,
                } => write!(
                    f,
                    "ℹ️ SKIPPED: Not enough funds (${}) to buy any {} of {} at ${}.",
                    money(*amount),
                    class.unit_label(),
                    symbol.as_deref().unwrap_or("unknown symbol"),
                    money(*price)
                ),
                SkipReason::NoBuyRecommendations => {
                    write!(f, "ℹ️ No stocks recommended for purchase.")
                }
            },
            TradeOutcome::Failed {
                symbol,
                side,
                error,
            } => write!(f, "❌ FAILED to {} {}. Error: {}", side, symbol, error),
            TradeOutcome::Warning { message } => write!(
                f,
                "⚠️ WARNING: Could not process selling of stocks to avoid. Error: {}",
                message
            ),
        }
    }
}
