use serde::{Deserialize, Serialize};

use crate::currency::CurrencyPair;
use crate::values::{RateValue, Timestamp};

/// A provider-sourced rate observation for a pair at a point in time
///
/// Ephemeral: quotes live in the shared cache under the pair key with a
/// short TTL and are never persisted directly. The persisted artifact is
/// the [`ClientRate`](crate::ClientRate) minted from one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub pair: CurrencyPair,
    pub value: RateValue,
    /// Provider-side observation time, not our receive time
    pub timestamp: Timestamp,
    pub provider: String,
}

impl Quote {
    pub fn new(
        pair: CurrencyPair,
        value: RateValue,
        timestamp: Timestamp,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            pair,
            value,
            timestamp,
            provider: provider.into(),
        }
    }

    /// Cache key for this quote: scoped to the pair, not the client
    pub fn cache_key(&self) -> String {
        self.pair.cache_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_cache_key_is_pair_scoped() {
        let pair = CurrencyPair::parse("EUR", "USD").unwrap();
        let quote = Quote::new(pair, dec!(1.08), Utc::now(), "fixer");
        assert_eq!(quote.cache_key(), "pair_EUR_USD");
    }

    #[test]
    fn test_quote_serde_round_trip() {
        let pair = CurrencyPair::parse("EUR", "AUD").unwrap();
        let quote = Quote::new(pair, dec!(1.03), Utc::now(), "fixer");
        let json = serde_json::to_string(&quote).unwrap();
        let back: Quote = serde_json::from_str(&json).unwrap();
        assert_eq!(back, quote);
    }
}
