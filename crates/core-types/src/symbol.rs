use crate::enums::InstrumentClass;
use serde::{Deserialize, Serialize};

/// Describes how crypto pairs are spelled in recommendation tickers.
///
/// Market data wants the separated pair (`BTC/USD`) while order submission and
/// the position list use the joined form (`BTCUSD`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolConvention {
    /// Separator between the base asset and the quote currency.
    pub separator: String,
    /// Quote currencies that mark a ticker as a crypto pair.
    pub crypto_quotes: Vec<String>,
    /// Also treat joined pairs such as `BTCUSD` as crypto.
    pub match_unseparated: bool,
}

impl Default for SymbolConvention {
    fn default() -> Self {
        Self {
            separator: "/".to_string(),
            crypto_quotes: vec!["USD".to_string(), "USDT".to_string(), "USDC".to_string()],
            match_unseparated: false,
        }
    }
}

/// A ticker in both notations plus its instrument class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedSymbol {
    pub class: InstrumentClass,
    /// Form expected by price lookups.
    pub data_symbol: String,
    /// Form expected by order submission and reported by the position list.
    pub broker_symbol: String,
}

/// Pure ticker classifier. Never fails: anything unrecognised is an equity.
#[derive(Debug, Clone)]
pub struct SymbolNormalizer {
    convention: SymbolConvention,
    quotes_longest_first: Vec<String>,
}

impl Default for SymbolNormalizer {
    fn default() -> Self {
        Self::new(SymbolConvention::default())
    }
}

impl SymbolNormalizer {
    pub fn new(convention: SymbolConvention) -> Self {
        let mut quotes_longest_first: Vec<String> = convention
            .crypto_quotes
            .iter()
            .map(|q| q.trim().to_uppercase())
            .filter(|q| !q.is_empty())
            .collect();
        quotes_longest_first.sort_by(|a, b| b.len().cmp(&a.len()));
        Self {
            convention,
            quotes_longest_first,
        }
    }

    pub fn convention(&self) -> &SymbolConvention {
        &self.convention
    }

    pub fn classify(&self, raw: &str) -> InstrumentClass {
        self.normalize(raw).class
    }

    pub fn data_symbol(&self, raw: &str) -> String {
        self.normalize(raw).data_symbol
    }

    pub fn broker_symbol(&self, raw: &str) -> String {
        self.normalize(raw).broker_symbol
    }

    pub fn normalize(&self, raw: &str) -> NormalizedSymbol {
        let symbol = raw.trim().to_uppercase();

        if let Some((base, quote)) = self.split_pair(&symbol) {
            return NormalizedSymbol {
                class: InstrumentClass::Crypto,
                data_symbol: format!("{}{}{}", base, self.convention.separator, quote),
                broker_symbol: format!("{}{}", base, quote),
            };
        }

        NormalizedSymbol {
            class: InstrumentClass::Equity,
            data_symbol: symbol.clone(),
            broker_symbol: symbol,
        }
    }

    fn split_pair<'a>(&self, symbol: &'a str) -> Option<(&'a str, &'a str)> {
        let separator = self.convention.separator.as_str();
        if !separator.is_empty() {
            if let Some((base, quote)) = symbol.rsplit_once(separator) {
                if !base.is_empty() && self.is_quote(quote) {
                    return Some((base, quote));
                }
                return None;
            }
        }

        if self.convention.match_unseparated {
            for quote in &self.quotes_longest_first {
                if let Some(base) = symbol.strip_suffix(quote.as_str()) {
                    if !base.is_empty() {
                        return Some((base, &symbol[base.len()..]));
                    }
                }
            }
        }
        None
    }

    fn is_quote(&self, candidate: &str) -> bool {
        self.quotes_longest_first.iter().any(|q| q == candidate)
    }
}
