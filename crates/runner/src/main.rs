//! Hermes runner - demo quote → lock → trade flow
//!
//! Wires the exchange against in-memory infrastructure (plus live providers
//! if API keys are configured) and walks one client through requesting a
//! rate, trading against it repeatedly, and hitting the admission limit.

mod bootstrap;
mod config;

use chrono::{Duration, Utc};
use hermes_exchange::{ExchangeError, TradeRequest};
use log::{error, info, warn};
use rust_decimal_macros::dec;

use crate::bootstrap::build_app;
use crate::config::{RunnerConfig, load_config, load_default_config};

fn load(path: Option<String>) -> RunnerConfig {
    match path {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("Could not load config '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => load_default_config().unwrap_or_else(|e| {
            error!("Embedded default config is broken: {}", e);
            std::process::exit(1);
        }),
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = load(std::env::args().nth(1));
    let app = build_app(&config);
    let hint = config.preferred_provider.as_deref();

    let client_id = 1;

    let rate = match app.quotes.get_rate("EUR", "USD", Some(client_id), hint).await {
        Ok(rate) => rate,
        Err(e) => {
            error!("Quote request failed: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Client {} quoted {} = {} (provider {}, tick {})",
        client_id, rate.pair, rate.value, rate.provider, rate.rate_timestamp
    );

    // Trade against the locked rate until the limiter pushes back
    for attempt in 1.. {
        let request = TradeRequest {
            client_id,
            base: "EUR".to_string(),
            target: "USD".to_string(),
            expected_rate: rate.value,
            base_amount: dec!(100),
            fees: dec!(0.50),
        };

        match app.trades.execute_trade(request).await {
            Ok(trade) => {
                info!(
                    "Trade {}: {} {} -> {} {} (fees {})",
                    attempt,
                    trade.base_amount,
                    trade.pair.base,
                    trade.target_amount,
                    trade.pair.target,
                    trade.fees
                );
            }
            Err(ExchangeError::LimitExceeded { next_available }) => {
                warn!(
                    "Trade {} refused: window full, next slot at {}",
                    attempt, next_available
                );
                break;
            }
            Err(e) => {
                error!("Trade {} failed: {}", attempt, e);
                std::process::exit(1);
            }
        }
    }

    let history = app
        .trades
        .trades_since(client_id, Utc::now() - Duration::hours(1))
        .await
        .unwrap_or_default();

    info!("Client {} executed {} trades in the last hour", client_id, history.len());
}
