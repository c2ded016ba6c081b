//! Currency codes and pairs
//!
//! Codes are validated at parse time, before anything touches a provider:
//! exactly three ASCII letters, uppercased, and present in the ISO 4217
//! table below. Keeping the check here means no component downstream ever
//! sees an unvalidated code.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Active ISO 4217 alphabetic codes, sorted for binary search.
const ISO_CURRENCIES: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN",
    "BAM", "BBD", "BDT", "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BRL",
    "BSD", "BTN", "BWP", "BYN", "BZD", "CAD", "CDF", "CHF", "CLP", "CNY",
    "COP", "CRC", "CUP", "CVE", "CZK", "DJF", "DKK", "DOP", "DZD", "EGP",
    "ERN", "ETB", "EUR", "FJD", "FKP", "GBP", "GEL", "GHS", "GIP", "GMD",
    "GNF", "GTQ", "GYD", "HKD", "HNL", "HRK", "HTG", "HUF", "IDR", "ILS",
    "INR", "IQD", "IRR", "ISK", "JMD", "JOD", "JPY", "KES", "KGS", "KHR",
    "KMF", "KPW", "KRW", "KWD", "KYD", "KZT", "LAK", "LBP", "LKR", "LRD",
    "LSL", "LYD", "MAD", "MDL", "MGA", "MKD", "MMK", "MNT", "MOP", "MRU",
    "MUR", "MVR", "MWK", "MXN", "MYR", "MZN", "NAD", "NGN", "NIO", "NOK",
    "NPR", "NZD", "OMR", "PAB", "PEN", "PGK", "PHP", "PKR", "PLN", "PYG",
    "QAR", "RON", "RSD", "RUB", "RWF", "SAR", "SBD", "SCR", "SDG", "SEK",
    "SGD", "SHP", "SLE", "SOS", "SRD", "SSP", "STN", "SVC", "SYP", "SZL",
    "THB", "TJS", "TMT", "TND", "TOP", "TRY", "TTD", "TWD", "TZS", "UAH",
    "UGX", "USD", "UYU", "UZS", "VES", "VND", "VUV", "WST", "XAF", "XCD",
    "XOF", "XPF", "YER", "ZAR", "ZMW", "ZWL",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("Invalid currency code: '{0}'")]
    InvalidCode(String),

    #[error("Base currency '{0}' needs to be different from target currency '{0}'")]
    SamePair(String),
}

/// A validated ISO 4217 currency code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency([u8; 3]);

impl Currency {
    /// Parse and validate a currency code
    ///
    /// Accepts lowercase input and uppercases it; rejects anything that is
    /// not exactly three letters or is unknown to ISO 4217.
    pub fn parse(code: &str) -> Result<Self, CurrencyError> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CurrencyError::InvalidCode(code.to_string()));
        }

        let upper = code.to_ascii_uppercase();
        if ISO_CURRENCIES.binary_search(&upper.as_str()).is_err() {
            return Err(CurrencyError::InvalidCode(code.to_string()));
        }

        let bytes = upper.as_bytes();
        Ok(Self([bytes[0], bytes[1], bytes[2]]))
    }

    pub fn as_str(&self) -> &str {
        // Always valid UTF-8: parse only admits ASCII letters
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Currency {
    type Error = CurrencyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Currency::parse(&value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.as_str().to_string()
    }
}

/// An ordered (base, target) currency pair
///
/// Direction matters: EUR/USD and USD/EUR are distinct pairs with distinct
/// cache keys and distinct client rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: Currency,
    pub target: Currency,
}

impl CurrencyPair {
    pub fn new(base: Currency, target: Currency) -> Result<Self, CurrencyError> {
        if base == target {
            return Err(CurrencyError::SamePair(base.to_string()));
        }
        Ok(Self { base, target })
    }

    /// Parse both legs and build the pair
    pub fn parse(base: &str, target: &str) -> Result<Self, CurrencyError> {
        Self::new(Currency::parse(base)?, Currency::parse(target)?)
    }

    /// Cache key for provider quotes scoped to this pair: `pair_EUR_USD`
    pub fn cache_key(&self) -> String {
        format!("pair_{}_{}", self.base, self.target)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.target)
    }
}
