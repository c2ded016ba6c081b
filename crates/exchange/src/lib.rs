//! Hermes Exchange Services
//!
//! The decision logic of the currency exchange:
//! - [`QuoteService`] - quote cache gate and client rate ledger
//! - [`TradeService`] - rate validity policy, trade admission, execution
//!
//! Both services speak to infrastructure only through the ports crate, so
//! composition decides what actually backs the cache and the stores.

mod error;
mod quote_service;
mod trade_service;

pub use error::{ExchangeError, Result};
pub use quote_service::QuoteService;
pub use trade_service::{TradeRequest, TradeService};
