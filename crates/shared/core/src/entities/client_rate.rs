use chrono::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::CurrencyPair;
use crate::entities::quote::Quote;
use crate::values::{ClientId, RateValue, Timestamp};

/// How long a client may trade against a quoted rate.
const VALIDITY_MINUTES: i64 = 30;

/// A persisted, client-scoped snapshot of what a client was last shown
///
/// Immutable after creation. A newer provider tick for the same
/// (client, pair) supersedes it with a fresh row; rows are never updated
/// in place and never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRate {
    pub id: Uuid,
    pub client_id: ClientId,
    pub pair: CurrencyPair,
    pub value: RateValue,
    pub provider: String,
    /// Provider-side quote time; freshness and supersession key off this
    pub rate_timestamp: Timestamp,
    pub created_at: Timestamp,
}

impl ClientRate {
    /// Mint a snapshot of a quote for a client
    pub fn from_quote(quote: &Quote, client_id: ClientId, now: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            pair: quote.pair,
            value: quote.value,
            provider: quote.provider.clone(),
            rate_timestamp: quote.timestamp,
            created_at: now,
        }
    }

    /// Does this rate supersede nothing, i.e. is it still the quote's tick?
    ///
    /// Equality on the provider timestamp is the versioning scheme: a new
    /// tick mints a new row.
    pub fn matches_quote(&self, quote: &Quote) -> bool {
        self.rate_timestamp == quote.timestamp
    }

    /// A rate older than 30 minutes may no longer be traded against
    pub fn is_fresh(&self, now: Timestamp) -> bool {
        now - self.rate_timestamp <= Duration::minutes(VALIDITY_MINUTES)
    }

    /// Cache key for the latest rate of this (pair, client): `pair_EUR_USD_7`
    pub fn cache_key(&self) -> String {
        lookup_cache_key(&self.pair, self.client_id)
    }
}

/// Cache key used to look up the latest ClientRate before one exists
pub fn lookup_cache_key(pair: &CurrencyPair, client_id: ClientId) -> String {
    format!("pair_{}_{}_{}", pair.base, pair.target, client_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn quote() -> Quote {
        let pair = CurrencyPair::parse("EUR", "USD").unwrap();
        Quote::new(pair, dec!(1.08), Utc::now(), "fixer")
    }

    #[test]
    fn test_mint_copies_quote_fields() {
        let q = quote();
        let now = Utc::now();
        let rate = ClientRate::from_quote(&q, 7, now);

        assert_eq!(rate.client_id, 7);
        assert_eq!(rate.pair, q.pair);
        assert_eq!(rate.value, q.value);
        assert_eq!(rate.provider, "fixer");
        assert_eq!(rate.rate_timestamp, q.timestamp);
        assert_eq!(rate.created_at, now);
    }

    #[test]
    fn test_matches_quote_on_timestamp_only() {
        let q = quote();
        let rate = ClientRate::from_quote(&q, 0, Utc::now());
        assert!(rate.matches_quote(&q));

        let mut newer = q.clone();
        newer.timestamp += Duration::seconds(1);
        assert!(!rate.matches_quote(&newer));
    }

    #[test]
    fn test_freshness_window() {
        let q = quote();
        let rate = ClientRate::from_quote(&q, 0, Utc::now());

        assert!(rate.is_fresh(rate.rate_timestamp + Duration::minutes(29)));
        assert!(rate.is_fresh(rate.rate_timestamp + Duration::minutes(30)));
        assert!(!rate.is_fresh(rate.rate_timestamp + Duration::minutes(31)));
    }

    #[test]
    fn test_cache_key_includes_client() {
        let rate = ClientRate::from_quote(&quote(), 42, Utc::now());
        assert_eq!(rate.cache_key(), "pair_EUR_USD_42");
    }
}
