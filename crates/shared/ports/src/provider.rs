use async_trait::async_trait;
use hermes_core::{CurrencyPair, Quote};
use thiserror::Error;

/// Errors from an external quote source
///
/// `Api` is the provider-side error payload (upstream numeric code plus a
/// machine-readable category); `Network` is transport failure; `Parse`
/// means the payload was unrecognizable, which callers treat as
/// internal/unexpected rather than actionable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Rate provider returned an error: {info}; code: {code}; type: {kind}")]
    Api {
        code: i32,
        kind: String,
        info: String,
    },

    #[error("Rate provider request failed: {0}")]
    Network(String),

    #[error("Rate provider response could not be parsed: {0}")]
    Parse(String),

    #[error("Missing API key for provider '{0}'")]
    MissingCredentials(String),
}

impl ProviderError {
    /// Upstream status code, when the provider supplied one
    pub fn upstream_code(&self) -> Option<i32> {
        match self {
            ProviderError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Port for an external quote source
///
/// Implementations receive an already-validated pair; currency validation
/// happens at parse time, before any network call. No retry here: retry
/// policy, if any, belongs to the implementation.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Get a live quote for a currency pair
    async fn fetch_rate(&self, pair: &CurrencyPair) -> ProviderResult<Quote>;

    /// Provider identifier, recorded on every quote it produces
    fn name(&self) -> &str;
}
