//! Bootstrap - wiring of cache, stores, providers, and services
//!
//! The composition root decides here, once, what backs each port: which
//! providers go into the registry, and that the rate store is the cached
//! decorator over the in-memory store.

use async_trait::async_trait;
use hermes_clock::SystemClock;
use hermes_core::{CurrencyPair, Quote};
use hermes_exchange::{QuoteService, TradeService};
use hermes_ports::{Clock, ProviderResult, RateProvider};
use hermes_provider::{ExchangeRatesDataProvider, FixerProvider, ProviderKind, ProviderRegistry};
use hermes_store::{CachedRateStore, MemoryCache, MemoryRateStore, MemoryTradeStore};
use log::{info, warn};
use rust_decimal_macros::dec;
use std::sync::Arc;

use crate::config::RunnerConfig;

/// Deterministic local quote source used when no API keys are configured
///
/// Quotes a fixed EUR-anchored value so the demo flow works offline. The
/// tick timestamp is quantized to the minute, mimicking a provider that
/// re-issues the same observation between ticks.
pub struct StubProvider {
    clock: Arc<dyn Clock>,
}

impl StubProvider {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl RateProvider for StubProvider {
    async fn fetch_rate(&self, pair: &CurrencyPair) -> ProviderResult<Quote> {
        let now = self.clock.now();
        let tick = chrono::DateTime::from_timestamp(now.timestamp() - now.timestamp() % 60, 0)
            .unwrap_or(now);
        Ok(Quote::new(*pair, dec!(1.0832), tick, self.name()))
    }

    fn name(&self) -> &str {
        "Stub"
    }
}

/// Everything a request path needs, wired once
pub struct App {
    pub quotes: QuoteService,
    pub trades: TradeService,
}

/// Build the provider registry from configured credentials
///
/// Without any key the stub becomes the default registration, so every
/// hint resolves to it.
pub fn build_registry(config: &RunnerConfig, clock: Arc<dyn Clock>) -> ProviderRegistry {
    let keys = &config.providers;

    if !keys.any() {
        warn!("No provider API keys configured, using the local stub provider");
        return ProviderRegistry::new(Arc::new(StubProvider::new(clock)));
    }

    let mut registry: Option<ProviderRegistry> = None;

    if let Some(key) = &keys.fixer_api_key {
        match FixerProvider::new(key) {
            Ok(provider) => {
                registry = Some(ProviderRegistry::new(Arc::new(provider)));
            }
            Err(e) => warn!("Skipping Fixer: {}", e),
        }
    }

    if let Some(key) = &keys.exchange_rates_data_api_key {
        match ExchangeRatesDataProvider::new(key) {
            Ok(provider) => {
                let provider: Arc<dyn RateProvider> = Arc::new(provider);
                match registry.as_mut() {
                    Some(r) => r.register(ProviderKind::ExchangeRatesData, provider),
                    None => {
                        let mut r = ProviderRegistry::new(provider.clone());
                        r.register(ProviderKind::ExchangeRatesData, provider);
                        registry = Some(r);
                    }
                }
            }
            Err(e) => warn!("Skipping ExchangeRatesData: {}", e),
        }
    }

    registry.unwrap_or_else(|| {
        warn!("No provider could be constructed, using the local stub provider");
        ProviderRegistry::new(Arc::new(StubProvider::new(clock)))
    })
}

/// Wire the full application from a config
pub fn build_app(config: &RunnerConfig) -> App {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());

    let cache = Arc::new(MemoryCache::new(clock.clone()));
    let rates = Arc::new(CachedRateStore::new(
        Arc::new(MemoryRateStore::new()),
        cache.clone(),
    ));
    let trade_store = Arc::new(MemoryTradeStore::new());

    let registry = Arc::new(build_registry(config, clock.clone()));

    info!("Hermes wired: in-memory cache and stores, cached rate ledger");

    App {
        quotes: QuoteService::new(
            registry,
            cache.clone(),
            rates.clone(),
            clock.clone(),
        ),
        trades: TradeService::new(rates, trade_store, cache, clock),
    }
}
