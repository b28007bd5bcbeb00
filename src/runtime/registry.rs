//! Process-wide cache of resource providers.

use std::collections::HashMap;
use std::sync::{
    Arc,
    PoisonError,
    RwLock,
};

use crate::config::FileOverrideConfig;
use crate::runtime::provider::{
    ProviderError,
    ResourceLoader,
    ResourceProvider,
};
use crate::runtime::source::TranslationSource;

/// Maps document identities to their providers.
///
/// Providers are created on first use and kept for the lifetime of the
/// registry. Construction happens under the write lock, so concurrent first
/// requests for one document observe a single provider.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    overrides: FileOverrideConfig,
    providers: RwLock<HashMap<String, Arc<ResourceProvider>>>,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new(overrides: FileOverrideConfig) -> Self {
        Self { overrides, providers: RwLock::new(HashMap::new()) }
    }

    /// Returns the provider for `source`, creating it on first use.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] when the invariant document cannot be loaded.
    /// Failed constructions are not cached.
    pub fn provider(&self, source: &TranslationSource) -> Result<Arc<ResourceProvider>, ProviderError> {
        {
            let providers = self.providers.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(provider) = providers.get(source.file()) {
                return Ok(Arc::clone(provider));
            }
        }

        let mut providers = self.providers.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(provider) = providers.get(source.file()) {
            return Ok(Arc::clone(provider));
        }
        let loader = ResourceLoader::new(source.resources(), &self.overrides);
        let provider = Arc::new(ResourceProvider::new(source.file(), loader)?);
        providers.insert(source.file().to_string(), Arc::clone(&provider));
        Ok(provider)
    }

    #[must_use]
    pub const fn overrides(&self) -> &FileOverrideConfig {
        &self.overrides
    }

    /// Number of providers created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
