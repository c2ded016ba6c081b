use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::currency::CurrencyPair;
use crate::entities::client_rate::ClientRate;
use crate::values::{ClientId, RateValue, Timestamp};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TradeError {
    #[error("Cannot convert currency with rate {0}")]
    NonPositiveRate(RateValue),
}

/// An executed currency conversion
///
/// Copies pair and rate value out of the [`ClientRate`] at construction
/// time; it references the rate by id but does not follow it afterwards.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub id: Uuid,
    pub client_id: ClientId,
    /// The ClientRate this trade executed against
    pub rate_id: Uuid,
    pub pair: CurrencyPair,
    pub rate: RateValue,
    pub base_amount: RateValue,
    pub fees: RateValue,
    pub target_amount: RateValue,
    pub created_at: Timestamp,
}

impl Trade {
    /// Execute a conversion against a validated rate
    ///
    /// `target_amount = base_amount * rate - fees`. The validity policy has
    /// already vetted the rate; the non-positive check here is the last
    /// line before money math happens against a broken value.
    pub fn execute(
        rate: &ClientRate,
        client_id: ClientId,
        base_amount: RateValue,
        fees: RateValue,
        now: Timestamp,
    ) -> Result<Self, TradeError> {
        if rate.value <= RateValue::ZERO {
            return Err(TradeError::NonPositiveRate(rate.value));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            client_id,
            rate_id: rate.id,
            pair: rate.pair,
            rate: rate.value,
            base_amount,
            fees,
            target_amount: base_amount * rate.value - fees,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::quote::Quote;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn client_rate(value: RateValue) -> ClientRate {
        let pair = CurrencyPair::parse("EUR", "USD").unwrap();
        let quote = Quote::new(pair, value, Utc::now(), "fixer");
        ClientRate::from_quote(&quote, 0, Utc::now())
    }

    #[test]
    fn test_conversion_math() {
        let trade = Trade::execute(&client_rate(dec!(1.08)), 0, dec!(100), dec!(0), Utc::now())
            .unwrap();
        assert_eq!(trade.target_amount, dec!(108.00));
    }

    #[test]
    fn test_conversion_math_rounding() {
        let trade = Trade::execute(&client_rate(dec!(0.9259)), 0, dec!(100), dec!(0), Utc::now())
            .unwrap();
        assert_eq!(trade.target_amount.round_dp(2), dec!(92.59));
    }

    #[test]
    fn test_fees_are_deducted_from_target() {
        let trade = Trade::execute(&client_rate(dec!(1.08)), 0, dec!(100), dec!(2.50), Utc::now())
            .unwrap();
        assert_eq!(trade.target_amount, dec!(105.50));
    }

    #[test]
    fn test_zero_and_negative_rates_rejected() {
        for value in [dec!(0), dec!(-1.08)] {
            let err = Trade::execute(&client_rate(value), 0, dec!(100), dec!(0), Utc::now())
                .unwrap_err();
            assert_eq!(err, TradeError::NonPositiveRate(value));
        }
    }

    #[test]
    fn test_trade_snapshots_rate_fields() {
        let rate = client_rate(dec!(1.03));
        let trade = Trade::execute(&rate, 5, dec!(100), dec!(0), Utc::now()).unwrap();

        assert_eq!(trade.rate_id, rate.id);
        assert_eq!(trade.pair, rate.pair);
        assert_eq!(trade.rate, rate.value);
        assert_eq!(trade.client_id, 5);
    }
}
