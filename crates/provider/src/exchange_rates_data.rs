use async_trait::async_trait;
use hermes_core::{CurrencyPair, Quote};
use hermes_ports::{ProviderError, ProviderResult, RateProvider};
use log::error;

use crate::payload::parse_latest;
use crate::rest::RestQuoteClient;

const DEFAULT_BASE_URL: &str = "https://api.apilayer.com/exchangerates_data";
const PROVIDER_NAME: &str = "ExchangeRatesData";

/// ExchangeRatesData quote source (api.apilayer.com/exchangerates_data)
///
/// Same gateway and payload shape as Fixer, different upstream dataset.
pub struct ExchangeRatesDataProvider {
    rest: RestQuoteClient,
}

impl ExchangeRatesDataProvider {
    pub fn new(api_key: &str) -> ProviderResult<Self> {
        if api_key.trim().is_empty() {
            return Err(ProviderError::MissingCredentials(PROVIDER_NAME.to_string()));
        }
        Ok(Self {
            rest: RestQuoteClient::new(DEFAULT_BASE_URL, api_key),
        })
    }

    /// Point at a different endpoint (stub servers in tests)
    pub fn with_base_url(base_url: &str, api_key: &str) -> ProviderResult<Self> {
        if api_key.trim().is_empty() {
            return Err(ProviderError::MissingCredentials(PROVIDER_NAME.to_string()));
        }
        Ok(Self {
            rest: RestQuoteClient::new(base_url, api_key),
        })
    }
}

#[async_trait]
impl RateProvider for ExchangeRatesDataProvider {
    async fn fetch_rate(&self, pair: &CurrencyPair) -> ProviderResult<Quote> {
        let body = self.rest.get_latest(pair).await.inspect_err(|e| {
            error!("{} request for {} failed: {}", PROVIDER_NAME, pair, e);
        })?;

        parse_latest(PROVIDER_NAME, pair, &body)
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}
