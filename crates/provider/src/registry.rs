use hermes_ports::RateProvider;
use std::collections::HashMap;
use std::sync::Arc;

/// Interchangeable quote sources, selected per request by hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Fixer,
    ExchangeRatesData,
}

impl ProviderKind {
    /// Default source when the caller expresses no usable preference
    pub const DEFAULT: ProviderKind = ProviderKind::Fixer;

    /// Map a caller-supplied hint to a kind; unrecognized or absent hints
    /// fall back to the default
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint {
            Some("exchange_rates_data_api") => ProviderKind::ExchangeRatesData,
            Some("fixer") => ProviderKind::Fixer,
            _ => Self::DEFAULT,
        }
    }
}

/// Lookup table mapping a [`ProviderKind`] to a provider instance
///
/// Resolved once per request; not a global singleton. Resolving a kind that
/// was never registered falls back to the default registration.
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn RateProvider>>,
    default: Arc<dyn RateProvider>,
}

impl ProviderRegistry {
    pub fn new(default: Arc<dyn RateProvider>) -> Self {
        let mut providers = HashMap::new();
        providers.insert(ProviderKind::DEFAULT, default.clone());
        Self { providers, default }
    }

    pub fn register(&mut self, kind: ProviderKind, provider: Arc<dyn RateProvider>) {
        self.providers.insert(kind, provider);
    }

    pub fn resolve(&self, kind: ProviderKind) -> Arc<dyn RateProvider> {
        self.providers
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }

    /// Resolve straight from a request hint
    pub fn resolve_hint(&self, hint: Option<&str>) -> Arc<dyn RateProvider> {
        self.resolve(ProviderKind::from_hint(hint))
    }
}
