//! Exchange error taxonomy
//!
//! Five families, each surfaced differently at the boundary:
//! input errors (`Currency`, `InvalidInput`), provider errors (`Provider`),
//! rate-validity rejections (`RateNotFound`, `RateExpired`, `RateMismatch`),
//! the admission outcome (`LimitExceeded`, which carries the next available
//! time and is not a fault), and internal failures (the rest).

use hermes_core::{ClientId, CurrencyError, CurrencyPair, RateValue, Timestamp, TradeError};
use hermes_ports::{CacheError, ProviderError, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    #[error("Invalid request: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("No rate for the pair {pair} found for the client {client_id}, please request a rate")]
    RateNotFound {
        client_id: ClientId,
        pair: CurrencyPair,
    },

    #[error("Rate {value} for {pair} is older than 30 minutes, please request a new rate")]
    RateExpired { pair: CurrencyPair, value: RateValue },

    #[error(
        "Rate value is different from client's last rate for the pair {pair}. \
         Expected value: {expected}. Latest rate value: {actual}"
    )]
    RateMismatch {
        pair: CurrencyPair,
        expected: RateValue,
        actual: RateValue,
    },

    #[error(
        "Trade limit exceeded. The limit is 10 trades per hour. \
         Next available trading time: {next_available}"
    )]
    LimitExceeded { next_available: Timestamp },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Trade(#[from] TradeError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ExchangeError {
    /// Is this an expected outcome the caller can self-correct from, as
    /// opposed to a fault?
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ExchangeError::Currency(_)
                | ExchangeError::InvalidInput(_)
                | ExchangeError::RateNotFound { .. }
                | ExchangeError::RateExpired { .. }
                | ExchangeError::RateMismatch { .. }
                | ExchangeError::LimitExceeded { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ExchangeError>;
