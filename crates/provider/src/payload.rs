//! Shared response payload for the apilayer quote endpoints
//!
//! Fixer and ExchangeRatesData return the same `latest` shape: a success
//! flag, the base code, a rates map keyed by target code, a unix timestamp,
//! and on failure an error object with {code, type, info}.

use chrono::DateTime;
use hermes_core::{CurrencyPair, Quote};
use hermes_ports::{ProviderError, ProviderResult};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub(crate) struct LatestResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub rates: HashMap<String, Decimal>,
    #[serde(default)]
    pub timestamp: i64,
    pub error: Option<PayloadError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PayloadError {
    #[serde(default)]
    pub code: i32,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub info: String,
}

/// Turn a raw `latest` body into a Quote for the requested pair
///
/// A well-formed error payload becomes `ProviderError::Api`; anything
/// undeserializable or missing the requested rate becomes `Parse`, which
/// callers treat as internal/unexpected.
pub(crate) fn parse_latest(
    provider_name: &str,
    pair: &CurrencyPair,
    body: &str,
) -> ProviderResult<Quote> {
    let response: LatestResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::Parse(format!("{}: {}; body: {}", provider_name, e, body)))?;

    if !response.success {
        return match response.error {
            Some(err) => Err(ProviderError::Api {
                code: err.code,
                kind: err.kind,
                info: err.info,
            }),
            None => Err(ProviderError::Parse(format!(
                "{}: unsuccessful response without error payload; body: {}",
                provider_name, body
            ))),
        };
    }

    let value = response
        .rates
        .get(pair.target.as_str())
        .copied()
        .ok_or_else(|| {
            ProviderError::Parse(format!(
                "{}: no rate for {} in response; body: {}",
                provider_name, pair.target, body
            ))
        })?;

    let timestamp = DateTime::from_timestamp(response.timestamp, 0).ok_or_else(|| {
        ProviderError::Parse(format!(
            "{}: invalid unix timestamp {}",
            provider_name, response.timestamp
        ))
    })?;

    Ok(Quote::new(*pair, value, timestamp, provider_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pair() -> CurrencyPair {
        CurrencyPair::parse("EUR", "USD").unwrap()
    }

    #[test]
    fn test_parse_successful_payload() {
        let body = r#"{
            "base": "EUR",
            "date": "2024-03-01",
            "rates": { "USD": 1.0832 },
            "success": true,
            "timestamp": 1709290800
        }"#;

        let quote = parse_latest("fixer", &pair(), body).unwrap();
        assert_eq!(quote.value, dec!(1.0832));
        assert_eq!(quote.provider, "fixer");
        assert_eq!(quote.timestamp.timestamp(), 1709290800);
        assert_eq!(quote.pair, pair());
    }

    #[test]
    fn test_parse_error_payload() {
        let body = r#"{
            "success": false,
            "error": { "code": 104, "type": "monthly_limit_reached", "info": "quota exceeded" }
        }"#;

        let err = parse_latest("fixer", &pair(), body).unwrap_err();
        assert_eq!(
            err,
            ProviderError::Api {
                code: 104,
                kind: "monthly_limit_reached".to_string(),
                info: "quota exceeded".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_garbage_is_parse_error() {
        let err = parse_latest("fixer", &pair(), "not json at all").unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[test]
    fn test_parse_missing_target_rate() {
        let body = r#"{
            "base": "EUR",
            "rates": { "GBP": 0.85 },
            "success": true,
            "timestamp": 1709290800
        }"#;

        let err = parse_latest("fixer", &pair(), body).unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[test]
    fn test_parse_unsuccessful_without_error_object() {
        let body = r#"{ "success": false }"#;
        let err = parse_latest("fixer", &pair(), body).unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }
}
