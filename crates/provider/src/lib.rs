//! Hermes Quote Providers
//!
//! HTTP adapters for the external quote sources plus the registry that
//! picks one by a runtime hint. Both live sources sit behind the apilayer
//! gateway and share a response shape; the payload parsing is factored out
//! and unit-tested on canned JSON.

mod exchange_rates_data;
mod fixer;
mod payload;
mod registry;
mod rest;

pub use exchange_rates_data::ExchangeRatesDataProvider;
pub use fixer::FixerProvider;
pub use registry::{ProviderKind, ProviderRegistry};
pub use rest::RestQuoteClient;
