//! Hermes Store Adapters
//!
//! Implementations of the cache and durable-store ports:
//! - [`MemoryCache`] - dashmap-backed blob cache with per-key absolute TTL
//! - [`MemoryRateStore`] / [`MemoryTradeStore`] - in-memory durable stores
//! - [`CachedRateStore`] - read/write-through decorator over any RateStore
//!
//! Callers hold `Arc<dyn RateStore>` etc., so whether a store is cached is
//! decided once at composition time.

mod cached;
mod memory;

pub use cached::CachedRateStore;
pub use memory::{MemoryCache, MemoryRateStore, MemoryTradeStore};
