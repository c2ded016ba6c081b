mod client_rate;
mod limiter;
mod quote;
mod trade;

pub use client_rate::{ClientRate, lookup_cache_key as rate_lookup_key};
pub use limiter::{LimiterError, TradeLimiter};
pub use quote::Quote;
pub use trade::{Trade, TradeError};
