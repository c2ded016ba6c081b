//! Hermes Core Domain
//!
//! Pure domain types for the Hermes currency exchange.
//! This crate contains no async, no I/O, and is 100% unit testable.
//!
//! Every time-dependent operation takes `now` explicitly; callers supply it
//! from a `Clock` port so the domain stays deterministic under test.

pub mod currency;
pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use currency::{Currency, CurrencyError, CurrencyPair};
pub use entities::{
    ClientRate,
    LimiterError,
    Quote,
    Trade,
    TradeError,
    TradeLimiter,
    rate_lookup_key,
};
pub use values::{ClientId, RateValue, Timestamp, ANONYMOUS_CLIENT};
