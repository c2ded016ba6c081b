//! Runner configuration
//!
//! JSON file with provider credentials and the default provider hint. The
//! embedded default has no keys, which makes the runner fall back to the
//! local stub provider.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    /// Hint passed to the provider registry for quote requests
    #[serde(default)]
    pub preferred_provider: Option<String>,
    #[serde(default)]
    pub providers: ProviderKeys,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderKeys {
    #[serde(default)]
    pub fixer_api_key: Option<String>,
    #[serde(default)]
    pub exchange_rates_data_api_key: Option<String>,
}

impl ProviderKeys {
    /// Anything actually configured?
    pub fn any(&self) -> bool {
        self.fixer_api_key.is_some() || self.exchange_rates_data_api_key.is_some()
    }
}

/// Load runner configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunnerConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<RunnerConfig, ConfigError> {
    let config: RunnerConfig = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<RunnerConfig, ConfigError> {
    let default_config = include_str!("hermes_config.json");
    load_config_from_str(default_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_config() {
        let config = load_default_config().unwrap();
        assert!(!config.providers.any());
    }

    #[test]
    fn test_load_config_with_keys() {
        let config = load_config_from_str(
            r#"{
                "preferred_provider": "exchange_rates_data_api",
                "providers": { "fixer_api_key": "k1", "exchange_rates_data_api_key": "k2" }
            }"#,
        )
        .unwrap();

        assert!(config.providers.any());
        assert_eq!(
            config.preferred_provider.as_deref(),
            Some("exchange_rates_data_api")
        );
    }

    #[test]
    fn test_malformed_config_is_a_parse_error() {
        assert!(matches!(
            load_config_from_str("{ nope"),
            Err(ConfigError::ParseError(_))
        ));
    }
}
