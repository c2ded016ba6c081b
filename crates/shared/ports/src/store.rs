use async_trait::async_trait;
use hermes_core::{ClientId, ClientRate, CurrencyPair, Timestamp, Trade};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Port for durable ClientRate storage
///
/// Rows are append-only; "latest" means most recently inserted for the
/// (client, pair) key.
#[async_trait]
pub trait RateStore: Send + Sync {
    async fn insert(&self, rate: ClientRate) -> StoreResult<()>;

    /// The most recent rate this client was shown for the pair, if any
    async fn latest_for_pair(
        &self,
        client_id: ClientId,
        pair: &CurrencyPair,
    ) -> StoreResult<Option<ClientRate>>;
}

/// Port for durable Trade storage
#[async_trait]
pub trait TradeStore: Send + Sync {
    async fn insert(&self, trade: Trade) -> StoreResult<()>;

    /// All trades for a client created at or after `from`
    async fn trades_since(&self, client_id: ClientId, from: Timestamp)
    -> StoreResult<Vec<Trade>>;

    /// Up to `limit` most recent trades for a client created at or after
    /// `since`; used to rebuild the admission window after cache loss
    async fn recent_trades(
        &self,
        client_id: ClientId,
        limit: usize,
        since: Timestamp,
    ) -> StoreResult<Vec<Trade>>;
}
