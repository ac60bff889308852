use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
    Limit,
}

/// How long a submitted order stays working at the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeInForce {
    Day,
    /// Good-till-canceled.
    #[default]
    Gtc,
    /// Immediate-or-cancel.
    Ioc,
}

/// The market an instrument trades in. Drives price lookup and quantity rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentClass {
    /// Whole-share instruments priced from the latest trade.
    Equity,
    /// Fractional instruments priced from the most recent bar close.
    Crypto,
}

impl InstrumentClass {
    /// The noun used for a quantity of this instrument in human-readable logs.
    pub fn unit_label(&self) -> &'static str {
        match self {
            InstrumentClass::Equity => "shares",
            InstrumentClass::Crypto => "units",
        }
    }
}
