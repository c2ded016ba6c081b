use hermes_core::CurrencyPair;
use hermes_ports::{ProviderError, ProviderResult};
use log::{debug, info};
use reqwest::Client;

/// REST client for the apilayer quote endpoints
///
/// Handles HTTP communication only; payload interpretation lives in
/// `payload`. Authentication is the `apikey` header.
#[derive(Clone)]
#[derive(Debug)]
pub struct RestQuoteClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestQuoteClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Fetch the raw `latest` body for a pair
    ///
    /// Non-2xx responses are surfaced with the upstream HTTP status so the
    /// caller can report what the provider actually said; transport
    /// failures become `Network`.
    pub async fn get_latest(&self, pair: &CurrencyPair) -> ProviderResult<String> {
        let url = format!(
            "{}/latest?base={}&symbols={}",
            self.base_url, pair.base, pair.target
        );

        info!("Requesting pair {} rate from {}", pair, self.base_url);

        let resp = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("Provider response ({}): {}", status, body);

        if !status.is_success() {
            // Prefer the provider's own error payload over the bare status
            if let Ok(parsed) = serde_json::from_str::<crate::payload::LatestResponse>(&body) {
                if let Some(err) = parsed.error {
                    return Err(ProviderError::Api {
                        code: err.code,
                        kind: err.kind,
                        info: err.info,
                    });
                }
            }
            return Err(ProviderError::Api {
                code: status.as_u16() as i32,
                kind: "Error in rate provider request".to_string(),
                info: body,
            });
        }

        Ok(body)
    }
}
