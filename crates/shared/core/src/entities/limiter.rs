//! Sliding-window trade admission
//!
//! A per-client window of recent trade timestamps, capped at
//! [`TradeLimiter::MAX_TRADES`] within [`TradeLimiter::WINDOW`]. The value
//! itself is pure state: it lives in the shared cache as a JSON blob and is
//! rebuilt from the persisted trade history whenever the cache loses it, so
//! the cache stays an optimization rather than a source of truth.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

use crate::values::{ClientId, Timestamp};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LimiterError {
    #[error("Maximum accepted are {max} trades, got {got}")]
    TooManySeedTrades { max: usize, got: usize },
}

/// Sliding-window admission control over a client's recent trades
///
/// Oldest-first sequence of trade timestamps. Every inspection runs
/// [`cleanup`](Self::cleanup) first, so the sequence only ever holds
/// entries inside the trailing window at the moment it is looked at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeLimiter {
    cache_key: String,
    timestamps: VecDeque<Timestamp>,
}

impl TradeLimiter {
    /// Trades admitted per window per client
    pub const MAX_TRADES: usize = 10;

    /// Lookback window for admission
    pub const WINDOW: Duration = Duration::hours(1);

    /// Build a limiter from persisted trade history
    ///
    /// More than [`MAX_TRADES`](Self::MAX_TRADES) seed entries is a
    /// data-integrity violation upstream (the history query is capped), so
    /// it is a hard error rather than a rejection.
    pub fn new(
        cache_key: impl Into<String>,
        seed: impl IntoIterator<Item = Timestamp>,
        now: Timestamp,
    ) -> Result<Self, LimiterError> {
        let mut timestamps: Vec<Timestamp> = seed.into_iter().collect();
        if timestamps.len() > Self::MAX_TRADES {
            return Err(LimiterError::TooManySeedTrades {
                max: Self::MAX_TRADES,
                got: timestamps.len(),
            });
        }
        timestamps.sort_unstable();

        let mut limiter = Self {
            cache_key: cache_key.into(),
            timestamps: timestamps.into(),
        };
        limiter.cleanup(now);
        Ok(limiter)
    }

    /// Cache key this limiter is stored under: `{client}_trade_limiter`
    pub fn key_for_client(client_id: ClientId) -> String {
        format!("{}_trade_limiter", client_id)
    }

    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Drop entries that have aged out of the trailing window
    pub fn cleanup(&mut self, now: Timestamp) {
        while let Some(oldest) = self.timestamps.front() {
            if now - *oldest > Self::WINDOW {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// Try to admit a trade at `timestamp`
    ///
    /// Admitted trades are appended; a refusal leaves the window untouched.
    pub fn admit(&mut self, timestamp: Timestamp) -> bool {
        self.cleanup(timestamp);

        if self.timestamps.len() >= Self::MAX_TRADES {
            return false;
        }

        self.timestamps.push_back(timestamp);
        true
    }

    /// When does the next slot open?
    ///
    /// Below capacity that is `now`; at capacity it is the instant the
    /// oldest entry ages out of the window.
    pub fn next_available(&self, now: Timestamp) -> Timestamp {
        if self.timestamps.len() < Self::MAX_TRADES {
            return now;
        }

        match self.timestamps.front() {
            Some(oldest) => *oldest + Self::WINDOW,
            None => now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn seed(count: usize, now: Timestamp) -> Vec<Timestamp> {
        (0..count)
            .map(|i| now - Duration::minutes(count as i64 - i as i64))
            .collect()
    }

    #[test]
    fn test_construct_within_bounds() {
        let now = Utc::now();
        for count in [0, 5, 10] {
            let limiter = TradeLimiter::new("testkey", seed(count, now), now).unwrap();
            assert_eq!(limiter.len(), count);
        }
    }

    #[test]
    fn test_construct_with_eleven_seeds_fails() {
        let now = Utc::now();
        let err = TradeLimiter::new("testkey", seed(11, now), now).unwrap_err();
        assert_eq!(err, LimiterError::TooManySeedTrades { max: 10, got: 11 });
    }

    #[test]
    fn test_construct_drops_aged_out_seeds() {
        let now = Utc::now();
        let mut trades = seed(5, now);
        trades.extend((0..5).map(|_| now - Duration::hours(2)));

        let limiter = TradeLimiter::new("testkey", trades, now).unwrap();
        assert_eq!(limiter.len(), 5);
    }

    #[test]
    fn test_admit_below_capacity() {
        let now = Utc::now();
        for count in [0, 5, 9] {
            let mut limiter = TradeLimiter::new("testkey", seed(count, now), now).unwrap();
            assert!(limiter.admit(now));
            assert_eq!(limiter.len(), count + 1);
        }
    }

    #[test]
    fn test_admit_at_capacity_refuses_without_mutating() {
        let now = Utc::now();
        let mut limiter = TradeLimiter::new("testkey", seed(10, now), now).unwrap();

        assert!(!limiter.admit(now));
        assert_eq!(limiter.len(), 10);
    }

    #[test]
    fn test_admit_after_oldest_ages_out() {
        let now = Utc::now();
        let mut trades = seed(9, now);
        trades.push(now - Duration::hours(2));

        let mut limiter = TradeLimiter::new("testkey", trades, now).unwrap();
        assert!(limiter.admit(now));
        assert_eq!(limiter.len(), 10);
    }

    #[test]
    fn test_next_available_below_capacity_is_now() {
        let now = Utc::now();
        let limiter = TradeLimiter::new("testkey", seed(9, now), now).unwrap();
        assert_eq!(limiter.next_available(now), now);
    }

    #[test]
    fn test_next_available_at_capacity_is_oldest_plus_window() {
        let now = Utc::now();
        let trades = seed(10, now);
        let oldest = trades[0];

        let limiter = TradeLimiter::new("testkey", trades, now).unwrap();
        assert_eq!(limiter.next_available(now), oldest + Duration::hours(1));
    }

    #[test]
    fn test_serde_round_trip_preserves_window() {
        let now = Utc::now();
        let limiter = TradeLimiter::new("7_trade_limiter", seed(3, now), now).unwrap();

        let blob = serde_json::to_string(&limiter).unwrap();
        let back: TradeLimiter = serde_json::from_str(&blob).unwrap();

        assert_eq!(back, limiter);
        assert_eq!(back.cache_key(), "7_trade_limiter");
    }

    #[test]
    fn test_key_for_client() {
        assert_eq!(TradeLimiter::key_for_client(42), "42_trade_limiter");
        assert_eq!(TradeLimiter::key_for_client(0), "0_trade_limiter");
    }
}
