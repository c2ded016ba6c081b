//! In-memory adapters for the cache and durable-store ports
//!
//! The stores are insertion-ordered, append-only vectors behind an async
//! RwLock; "latest" means highest insertion sequence, matching the durable
//! store contract. The cache expires lazily on read against an injected
//! clock so tests can steer time.

use async_trait::async_trait;
use chrono::Duration;
use dashmap::DashMap;
use hermes_core::{ClientId, ClientRate, CurrencyPair, Timestamp, Trade};
use hermes_ports::{
    CacheResult, CacheStore, Clock, RateStore, StoreResult, TradeStore,
};
use std::sync::Arc;
use tokio::sync::RwLock;

struct CacheEntry {
    value: String,
    expires_at: Timestamp,
}

/// Process-local stand-in for the shared distributed cache
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
    clock: Arc<dyn Clock>,
}

impl MemoryCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = self.clock.now();

        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > now {
                return Ok(Some(entry.value.clone()));
            }
        }

        // Expired entries are reaped on the read that finds them
        self.entries
            .remove_if(key, |_, entry| entry.expires_at <= now);
        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> CacheResult<()> {
        let expires_at = self.clock.now() + ttl;
        self.entries
            .insert(key.to_string(), CacheEntry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// In-memory durable store for client rates
pub struct MemoryRateStore {
    rows: RwLock<Vec<ClientRate>>,
}

impl MemoryRateStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryRateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateStore for MemoryRateStore {
    async fn insert(&self, rate: ClientRate) -> StoreResult<()> {
        self.rows.write().await.push(rate);
        Ok(())
    }

    async fn latest_for_pair(
        &self,
        client_id: ClientId,
        pair: &CurrencyPair,
    ) -> StoreResult<Option<ClientRate>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .rev()
            .find(|r| r.client_id == client_id && r.pair == *pair)
            .cloned())
    }
}

/// In-memory durable store for trades
pub struct MemoryTradeStore {
    rows: RwLock<Vec<Trade>>,
}

impl MemoryTradeStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryTradeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TradeStore for MemoryTradeStore {
    async fn insert(&self, trade: Trade) -> StoreResult<()> {
        self.rows.write().await.push(trade);
        Ok(())
    }

    async fn trades_since(
        &self,
        client_id: ClientId,
        from: Timestamp,
    ) -> StoreResult<Vec<Trade>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|t| t.client_id == client_id && t.created_at >= from)
            .cloned()
            .collect())
    }

    async fn recent_trades(
        &self,
        client_id: ClientId,
        limit: usize,
        since: Timestamp,
    ) -> StoreResult<Vec<Trade>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .rev()
            .filter(|t| t.client_id == client_id && t.created_at >= since)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_clock::FixedClock;
    use hermes_core::Quote;
    use rust_decimal_macros::dec;

    fn fixtures() -> (Arc<FixedClock>, CurrencyPair) {
        (
            Arc::new(FixedClock::from_system()),
            CurrencyPair::parse("EUR", "USD").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_cache_honors_ttl() {
        let (clock, _) = fixtures();
        let cache = MemoryCache::new(clock.clone());

        cache
            .set("k", "v".to_string(), Duration::seconds(120))
            .await
            .unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));

        clock.advance(Duration::seconds(121));
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_cache_delete() {
        let (clock, _) = fixtures();
        let cache = MemoryCache::new(clock);

        cache
            .set("k", "v".to_string(), Duration::hours(1))
            .await
            .unwrap();
        cache.delete("k").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rate_store_returns_latest_row() {
        let (clock, pair) = fixtures();
        let store = MemoryRateStore::new();

        let quote = Quote::new(pair, dec!(1.08), clock.now(), "fixer");
        let first = ClientRate::from_quote(&quote, 1, clock.now());
        let second = ClientRate::from_quote(&quote, 1, clock.now());

        store.insert(first).await.unwrap();
        store.insert(second.clone()).await.unwrap();

        let latest = store.latest_for_pair(1, &pair).await.unwrap().unwrap();
        assert_eq!(latest.id, second.id);
        assert_eq!(store.latest_for_pair(2, &pair).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_trade_store_query_contracts() {
        let (clock, pair) = fixtures();
        let store = MemoryTradeStore::new();
        let now = clock.now();

        let quote = Quote::new(pair, dec!(1.08), now, "fixer");
        let rate = ClientRate::from_quote(&quote, 1, now);

        for i in 0..5i64 {
            let trade = Trade::execute(
                &rate,
                1,
                dec!(100),
                dec!(0),
                now - Duration::minutes(50 - i * 10),
            )
            .unwrap();
            store.insert(trade).await.unwrap();
        }

        let since = now - Duration::minutes(25);
        let recent = store.recent_trades(1, 2, since).await.unwrap();
        assert_eq!(recent.len(), 2);
        // Newest first
        assert!(recent[0].created_at >= recent[1].created_at);

        let all = store.trades_since(1, now - Duration::hours(1)).await.unwrap();
        assert_eq!(all.len(), 5);
        assert!(store.trades_since(2, now).await.unwrap().is_empty());
    }
}
