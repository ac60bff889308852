use std::fmt;

/// Lifecycle of one instrument in the buy phase.
///
/// `PendingPriceLookup -> {PendingSubmission | Failed}`,
/// `PendingSubmission -> {Submitted | Skipped | Failed}`.
/// Terminal states never move again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuyState {
    PendingPriceLookup,
    PendingSubmission,
    Submitted,
    Skipped,
    Failed,
}

impl BuyState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BuyState::Submitted | BuyState::Skipped | BuyState::Failed)
    }

    pub fn can_transition_to(&self, next: BuyState) -> bool {
        matches!(
            (self, next),
            (BuyState::PendingPriceLookup, BuyState::PendingSubmission)
                | (BuyState::PendingPriceLookup, BuyState::Failed)
                | (BuyState::PendingSubmission, BuyState::Submitted)
                | (BuyState::PendingSubmission, BuyState::Skipped)
                | (BuyState::PendingSubmission, BuyState::Failed)
        )
    }
}

impl fmt::Display for BuyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Tracks one instrument through `BuyState`. Each instrument gets its own tracker.
#[derive(Debug)]
pub struct InstrumentTracker {
    symbol: String,
    state: BuyState,
}

impl InstrumentTracker {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            state: BuyState::PendingPriceLookup,
        }
    }

    pub fn state(&self) -> BuyState {
        self.state
    }

    /// Moves to `next`. Returns `false` and stays put if the move is not allowed.
    pub fn advance(&mut self, next: BuyState) -> bool {
        if !self.state.can_transition_to(next) {
            tracing::error!(symbol = %self.symbol, from = %self.state, to = %next, "Illegal buy-state transition.");
            return false;
        }
        tracing::trace!(symbol = %self.symbol, from = %self.state, to = %next, "Buy-state transition.");
        self.state = next;
        true
    }
}
