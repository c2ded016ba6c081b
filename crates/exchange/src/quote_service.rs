//! Quote cache gate and client rate ledger
//!
//! A quote request flows: pair cache (hit ends here) → provider fetch →
//! cache write → ledger lookup → reuse or mint a per-client rate row.

use chrono::Duration;
use hermes_core::{ANONYMOUS_CLIENT, ClientId, ClientRate, CurrencyPair, Quote};
use hermes_ports::{CacheStore, Clock, RateStore, get_json, set_json};
use hermes_provider::ProviderRegistry;
use log::info;
use std::sync::Arc;

use crate::error::Result;

/// Provider quotes stay shared across clients for this long
const QUOTE_TTL: Duration = Duration::seconds(120);

/// Quotes rates to clients and records what each client was shown
pub struct QuoteService {
    registry: Arc<ProviderRegistry>,
    cache: Arc<dyn CacheStore>,
    rates: Arc<dyn RateStore>,
    clock: Arc<dyn Clock>,
}

impl QuoteService {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        cache: Arc<dyn CacheStore>,
        rates: Arc<dyn RateStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            cache,
            rates,
            clock,
        }
    }

    /// Quote a pair for a client, minting a ledger row when needed
    ///
    /// `client_id` defaults to the anonymous client; `preferred_provider`
    /// is a hint, unrecognized values fall back to the default source.
    pub async fn get_rate(
        &self,
        base: &str,
        target: &str,
        client_id: Option<ClientId>,
        preferred_provider: Option<&str>,
    ) -> Result<ClientRate> {
        let pair = CurrencyPair::parse(base, target)?;
        let quote = self.provider_quote(&pair, preferred_provider).await?;
        self.get_or_create_client_rate(&quote, client_id.unwrap_or(ANONYMOUS_CLIENT))
            .await
    }

    /// Quote Cache Gate: serve the pair from cache or fetch and cache it
    async fn provider_quote(
        &self,
        pair: &CurrencyPair,
        preferred_provider: Option<&str>,
    ) -> Result<Quote> {
        let key = pair.cache_key();

        info!("Getting provider rate for {}", key);

        if let Some(quote) = get_json::<Quote>(self.cache.as_ref(), &key).await? {
            return Ok(quote);
        }

        info!("Cache miss, about to ask the rate provider for a rate");

        let provider = self.registry.resolve_hint(preferred_provider);
        let quote = provider.fetch_rate(pair).await?;

        info!("Got {} rate from provider {}", pair, quote.provider);

        set_json(self.cache.as_ref(), &key, &quote, QUOTE_TTL).await?;

        Ok(quote)
    }

    /// Client Rate Ledger: reuse the client's latest row unless the
    /// provider has ticked since, in which case mint a new snapshot
    pub async fn get_or_create_client_rate(
        &self,
        quote: &Quote,
        client_id: ClientId,
    ) -> Result<ClientRate> {
        info!(
            "Getting client {} rate for pair {}",
            client_id, quote.pair
        );

        if let Some(existing) = self.rates.latest_for_pair(client_id, &quote.pair).await? {
            if existing.matches_quote(quote) {
                return Ok(existing);
            }
        }

        info!("Rate not found or outdated, creating new rate");

        let rate = ClientRate::from_quote(quote, client_id, self.clock.now());
        self.rates.insert(rate.clone()).await?;

        info!("New client rate created");

        Ok(rate)
    }
}
