use async_trait::async_trait;
use chrono::Duration;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),

    #[error("Cache serialization error: {0}")]
    Serialization(String),
}

pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Port for the shared key/value cache
///
/// A string-blob store with per-key absolute TTL. Writers own disjoint key
/// namespaces (pair keys, pair+client keys, limiter keys), so no cross-key
/// transactions exist or are assumed.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Set a value with an absolute TTL; the write is atomic per key
    async fn set(&self, key: &str, value: String, ttl: Duration) -> CacheResult<()>;

    async fn delete(&self, key: &str) -> CacheResult<()>;
}

/// Fetch and deserialize a JSON blob from the cache
pub async fn get_json<T: DeserializeOwned>(
    cache: &dyn CacheStore,
    key: &str,
) -> CacheResult<Option<T>> {
    match cache.get(key).await? {
        Some(blob) => serde_json::from_str(&blob)
            .map(Some)
            .map_err(|e| CacheError::Serialization(e.to_string())),
        None => Ok(None),
    }
}

/// Serialize a value to JSON and cache it under `key` with a TTL
pub async fn set_json<T: Serialize>(
    cache: &dyn CacheStore,
    key: &str,
    value: &T,
    ttl: Duration,
) -> CacheResult<()> {
    let blob =
        serde_json::to_string(value).map_err(|e| CacheError::Serialization(e.to_string()))?;
    cache.set(key, blob, ttl).await
}
