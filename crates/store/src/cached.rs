//! Read/write-through caching decorator for the rate store
//!
//! Durable storage stays authoritative; the cache only short-circuits hot
//! reads. On the write path the durable insert happens first and the cache
//! write second, never the other way around, so a crash between the two
//! leaves the cache merely cold, not wrong.

use async_trait::async_trait;
use chrono::Duration;
use hermes_core::{ClientId, ClientRate, CurrencyPair, rate_lookup_key};
use hermes_ports::{CacheStore, RateStore, StoreResult, get_json, set_json};
use log::{debug, warn};
use std::sync::Arc;

/// TTL for rates cached on the write path
const WRITE_TTL: Duration = Duration::minutes(30);

/// TTL for rates populated on a read miss
const READ_TTL: Duration = Duration::minutes(5);

/// RateStore decorator that layers the shared cache over a durable store
pub struct CachedRateStore {
    inner: Arc<dyn RateStore>,
    cache: Arc<dyn CacheStore>,
}

impl CachedRateStore {
    pub fn new(inner: Arc<dyn RateStore>, cache: Arc<dyn CacheStore>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl RateStore for CachedRateStore {
    async fn insert(&self, rate: ClientRate) -> StoreResult<()> {
        let key = rate.cache_key();

        // Durable write first; cache population follows a successful insert
        self.inner.insert(rate.clone()).await?;

        if let Err(e) = set_json(self.cache.as_ref(), &key, &rate, WRITE_TTL).await {
            // A cold cache is just a slower read later
            warn!("Failed to cache rate under {}: {}", key, e);
        }
        Ok(())
    }

    async fn latest_for_pair(
        &self,
        client_id: ClientId,
        pair: &CurrencyPair,
    ) -> StoreResult<Option<ClientRate>> {
        let key = rate_lookup_key(pair, client_id);

        match get_json::<ClientRate>(self.cache.as_ref(), &key).await {
            Ok(Some(rate)) => {
                debug!("Rate cache hit for {}", key);
                return Ok(Some(rate));
            }
            Ok(None) => {}
            Err(e) => {
                // A broken cache entry downgrades to a durable read
                warn!("Failed to read rate cache under {}: {}", key, e);
            }
        }

        let rate = self.inner.latest_for_pair(client_id, pair).await?;

        if let Some(rate) = &rate {
            if let Err(e) = set_json(self.cache.as_ref(), &key, rate, READ_TTL).await {
                warn!("Failed to populate rate cache under {}: {}", key, e);
            }
        }

        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryCache, MemoryRateStore};
    use hermes_clock::{Clock, FixedClock};
    use hermes_core::Quote;
    use rust_decimal_macros::dec;

    struct Harness {
        clock: Arc<FixedClock>,
        cache: Arc<MemoryCache>,
        inner: Arc<MemoryRateStore>,
        cached: CachedRateStore,
        pair: CurrencyPair,
    }

    fn setup() -> Harness {
        let clock = Arc::new(FixedClock::from_system());
        let cache = Arc::new(MemoryCache::new(clock.clone()));
        let inner = Arc::new(MemoryRateStore::new());
        let cached = CachedRateStore::new(inner.clone(), cache.clone());
        let pair = CurrencyPair::parse("EUR", "USD").unwrap();
        Harness {
            clock,
            cache,
            inner,
            cached,
            pair,
        }
    }

    fn rate(pair: CurrencyPair, client: ClientId, clock: &FixedClock) -> ClientRate {
        let quote = Quote::new(pair, dec!(1.08), clock.now(), "fixer");
        ClientRate::from_quote(&quote, client, clock.now())
    }

    #[tokio::test]
    async fn test_insert_writes_through_to_cache() {
        let h = setup();
        let rate = rate(h.pair, 1, &h.clock);

        h.cached.insert(rate.clone()).await.unwrap();

        // Durable row landed
        assert_eq!(
            h.inner.latest_for_pair(1, &h.pair).await.unwrap().unwrap().id,
            rate.id
        );
        // Read is served even though the inner store could now disappear
        let found = h.cached.latest_for_pair(1, &h.pair).await.unwrap().unwrap();
        assert_eq!(found, rate);
    }

    #[tokio::test]
    async fn test_read_miss_populates_cache() {
        let h = setup();
        let rate = rate(h.pair, 1, &h.clock);

        // Row exists only durably
        h.inner.insert(rate.clone()).await.unwrap();

        let first = h.cached.latest_for_pair(1, &h.pair).await.unwrap().unwrap();
        assert_eq!(first.id, rate.id);

        // Populated entry expires with the read TTL
        h.clock.advance(Duration::minutes(6));
        let second = h.cached.latest_for_pair(1, &h.pair).await.unwrap().unwrap();
        assert_eq!(second.id, rate.id);
    }

    #[tokio::test]
    async fn test_absent_rate_is_none() {
        let h = setup();
        assert_eq!(h.cached.latest_for_pair(9, &h.pair).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_falls_back_to_store() {
        let h = setup();
        let rate = rate(h.pair, 1, &h.clock);

        h.inner.insert(rate.clone()).await.unwrap();

        // A blob that no longer deserializes must not mask the durable row
        let key = rate_lookup_key(&h.pair, 1);
        h.cache
            .set(&key, "{not json".to_string(), Duration::minutes(5))
            .await
            .unwrap();

        let found = h.cached.latest_for_pair(1, &h.pair).await.unwrap().unwrap();
        assert_eq!(found.id, rate.id);
    }
}
