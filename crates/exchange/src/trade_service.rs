//! Rate validity policy, trade admission, and execution
//!
//! The trade path has a fixed order: validate the rate → load (or rebuild)
//! the limiter → construct the trade → attempt admission → re-cache the
//! limiter → persist the trade. A refused admission mutates nothing.

use chrono::Duration;
use hermes_core::{
    ClientId, ClientRate, CurrencyPair, RateValue, Timestamp, Trade, TradeLimiter,
};
use hermes_ports::{CacheStore, Clock, RateStore, TradeStore, get_json, set_json};
use log::info;
use std::sync::Arc;

use crate::error::{ExchangeError, Result};

/// Cached limiter blobs live exactly one admission window
const LIMITER_TTL: Duration = Duration::hours(1);

/// Parameters of a trade request, as asserted by the client
#[derive(Debug, Clone)]
pub struct TradeRequest {
    pub client_id: ClientId,
    pub base: String,
    pub target: String,
    /// The rate value the client believes it was shown
    pub expected_rate: RateValue,
    pub base_amount: RateValue,
    pub fees: RateValue,
}

/// Executes trades against previously quoted rates under admission control
pub struct TradeService {
    rates: Arc<dyn RateStore>,
    trades: Arc<dyn TradeStore>,
    cache: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
}

impl TradeService {
    pub fn new(
        rates: Arc<dyn RateStore>,
        trades: Arc<dyn TradeStore>,
        cache: Arc<dyn CacheStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rates,
            trades,
            cache,
            clock,
        }
    }

    /// Trade history for a client from `from` onwards
    pub async fn trades_since(&self, client_id: ClientId, from: Timestamp) -> Result<Vec<Trade>> {
        if from > self.clock.now() {
            return Err(ExchangeError::InvalidInput(
                "Date from cannot be in the future".to_string(),
            ));
        }

        Ok(self.trades.trades_since(client_id, from).await?)
    }

    /// Execute a trade against the client's latest quoted rate
    pub async fn execute_trade(&self, request: TradeRequest) -> Result<Trade> {
        let pair = CurrencyPair::parse(&request.base, &request.target)?;

        info!(
            "Starting trading pair {} for client {}",
            pair, request.client_id
        );

        let rate = self
            .validate_rate(request.client_id, &pair, request.expected_rate)
            .await?;

        info!("Rate is valid");

        let mut limiter = self.load_limiter(request.client_id).await?;

        let trade = Trade::execute(
            &rate,
            request.client_id,
            request.base_amount,
            request.fees,
            self.clock.now(),
        )?;

        if !limiter.admit(trade.created_at) {
            let next_available = limiter.next_available(trade.created_at);
            info!(
                "Client {} trade limit exceeded. Next available trading time: {}",
                request.client_id, next_available
            );
            return Err(ExchangeError::LimitExceeded { next_available });
        }

        info!("Client within trading limit, saving trade");

        // Admission accepted: re-cache the window, then persist the trade.
        // Persistence is last so an abandoned request leaves no partial row.
        set_json(self.cache.as_ref(), limiter.cache_key(), &limiter, LIMITER_TTL).await?;
        self.trades.insert(trade.clone()).await?;

        Ok(trade)
    }

    /// Rate Validity Policy: not-found, then expired, then value mismatch
    ///
    /// The checks short-circuit in that order; an expired rate reports as
    /// expired even when its value also mismatches.
    pub async fn validate_rate(
        &self,
        client_id: ClientId,
        pair: &CurrencyPair,
        expected: RateValue,
    ) -> Result<ClientRate> {
        let rate = self
            .rates
            .latest_for_pair(client_id, pair)
            .await?
            .ok_or(ExchangeError::RateNotFound {
                client_id,
                pair: *pair,
            })?;

        if !rate.is_fresh(self.clock.now()) {
            return Err(ExchangeError::RateExpired {
                pair: *pair,
                value: rate.value,
            });
        }

        if rate.value != expected {
            return Err(ExchangeError::RateMismatch {
                pair: *pair,
                expected,
                actual: rate.value,
            });
        }

        Ok(rate)
    }

    /// Fetch the client's limiter from cache, rebuilding from persisted
    /// trade history on a miss
    async fn load_limiter(&self, client_id: ClientId) -> Result<TradeLimiter> {
        let key = TradeLimiter::key_for_client(client_id);

        info!("Getting trade limiter");

        if let Some(limiter) = get_json::<TradeLimiter>(self.cache.as_ref(), &key).await? {
            return Ok(limiter);
        }

        info!("Trade limiter cache miss, rebuilding from client's latest trades");

        let now = self.clock.now();
        let window_start = now - TradeLimiter::WINDOW;
        let recent = self
            .trades
            .recent_trades(client_id, TradeLimiter::MAX_TRADES, window_start)
            .await?;

        // The history query is capped at MAX_TRADES, so an over-long seed
        // means the store contract is broken
        let limiter = TradeLimiter::new(key, recent.iter().map(|t| t.created_at), now)
            .map_err(|e| ExchangeError::Internal(e.to_string()))?;

        info!("Trade limiter built, caching for 1 hour");

        set_json(self.cache.as_ref(), limiter.cache_key(), &limiter, LIMITER_TTL).await?;

        Ok(limiter)
    }
}
