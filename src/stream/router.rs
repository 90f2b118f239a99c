//! Routes page URLs to the matching stream provider.

use tracing::debug;

use super::host::ExtractorHost;
use super::provider::{StreamInfo, StreamProvider};
use super::providers::GlobeWienProvider;
use crate::config::Config;
use crate::error::{ExtractError, Result};

/// Providers are checked in registration order. First match wins.
pub struct ProviderRouter {
    providers: Vec<Box<dyn StreamProvider>>,
}

impl ProviderRouter {
    /// Create a router with all available providers.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Create a router whose providers honour `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let providers: Vec<Box<dyn StreamProvider>> =
            vec![Box::new(GlobeWienProvider::with_api_base(&config.api_base))];

        Self { providers }
    }

    /// Find the provider responsible for `url`.
    #[must_use]
    pub fn find(&self, url: &str) -> Option<&dyn StreamProvider> {
        self.providers
            .iter()
            .find(|p| p.matches(url))
            .map(Box::as_ref)
    }

    /// Extract `url` with the first matching provider.
    pub async fn extract(&self, url: &str, host: &dyn ExtractorHost) -> Result<StreamInfo> {
        let provider = self
            .find(url)
            .ok_or_else(|| ExtractError::UnsupportedUrl(url.to_string()))?;
        debug!("Matched stream provider: {}", provider.name());
        provider.extract(url, host).await
    }

    /// Names of all registered providers.
    pub fn provider_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.providers.iter().map(|p| p.name())
    }
}

impl Default for ProviderRouter {
    fn default() -> Self {
        Self::new()
    }
}
