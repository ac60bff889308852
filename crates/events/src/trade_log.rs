use crate::outcome::{LogLevel, OutcomeKind, TradeOutcome};
use serde::{Deserialize, Serialize};

/// Ordered accumulation of outcomes for one pipeline run.
///
/// Append-only: no deduplication and no reordering, so the rendered log reads
/// in exactly the order the actions were attempted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeLog {
    outcomes: Vec<TradeOutcome>,
}

impl TradeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one outcome and mirrors it to the diagnostic log.
    pub fn record(&mut self, outcome: TradeOutcome) {
        match outcome.level() {
            LogLevel::Info => tracing::info!(kind = ?outcome.kind(), symbol = ?outcome.symbol(), "{}", outcome),
            LogLevel::Warn => tracing::warn!(kind = ?outcome.kind(), "{}", outcome),
            LogLevel::Error => tracing::error!(kind = ?outcome.kind(), symbol = ?outcome.symbol(), "{}", outcome),
        }
        self.outcomes.push(outcome);
    }

    /// Appends the outcomes of a later phase after everything recorded so far.
    pub fn append(&mut self, other: TradeLog) {
        self.outcomes.extend(other.outcomes);
    }

    pub fn outcomes(&self) -> &[TradeOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<TradeOutcome> {
        self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.outcomes.iter().filter(|o| o.kind() == kind).count()
    }

    /// Renders every outcome to its display string, preserving order.
    pub fn render(&self) -> Vec<String> {
        self.outcomes.iter().map(TradeOutcome::message).collect()
    }
}

impl FromIterator<TradeOutcome> for TradeLog {
    fn from_iter<I: IntoIterator<Item = TradeOutcome>>(iter: I) -> Self {
        Self {
            outcomes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{InstrumentClass, OrderSide};
    use rust_decimal_macros::dec;

    #[test]
    fn test_append_keeps_phase_order() {
        let mut reconciliation = TradeLog::new();
        reconciliation.record(TradeOutcome::Sold {
            symbol: "XOM".to_string(),
            quantity: dec!(4),
            class: InstrumentClass::Equity,
        });

        let mut buys = TradeLog::new();
        buys.record(TradeOutcome::missing_ticker("Private Co"));
        buys.record(TradeOutcome::Failed {
            symbol: "TSLA".to_string(),
            side: OrderSide::Buy,
            error: "halted".to_string(),
        });
        // Duplicate entries are kept as-is.
        buys.record(TradeOutcome::missing_ticker("Private Co"));

        reconciliation.append(buys);
        let kinds: Vec<_> = reconciliation.outcomes().iter().map(|o| o.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                OutcomeKind::Sold,
                OutcomeKind::Skipped,
                OutcomeKind::Failed,
                OutcomeKind::Skipped
            ]
        );
        assert_eq!(reconciliation.count(OutcomeKind::Skipped), 2);
        assert_eq!(reconciliation.render()[0], "✅ SOLD all 4 shares of XOM.");
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let log: TradeLog = vec![TradeOutcome::no_buy_recommendations()].into_iter().collect();
        let json = serde_json::to_value(&log).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 1);
    }
}
