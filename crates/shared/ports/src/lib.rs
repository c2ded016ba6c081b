//! Hermes Ports
//!
//! Port definitions (traits) for the Hermes currency exchange.
//! These define the boundaries between domain logic and infrastructure:
//! the clock, the external quote providers, the shared cache, and the
//! durable rate/trade stores.

mod cache;
mod clock;
mod provider;
mod store;

pub use cache::{CacheError, CacheResult, CacheStore, get_json, set_json};
pub use clock::Clock;
pub use provider::{ProviderError, ProviderResult, RateProvider};
pub use store::{RateStore, StoreError, StoreResult, TradeStore};
