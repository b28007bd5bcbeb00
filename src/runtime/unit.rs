//! Handles returned by generated accessors.

use std::sync::{
    Arc,
    Mutex,
    PoisonError,
};

use crate::runtime::broadcaster::Subscription;
use crate::runtime::localizer::{
    Localizer,
    resolve_with,
};
use crate::runtime::provider::ProviderError;
use crate::runtime::source::TranslationSource;

/// One translation key bound to its document.
///
/// The value follows the localizer's current locale: after a locale switch the
/// next [`value`](Self::value) call resolves again, and subscribers receive the
/// new text.
#[derive(Debug)]
pub struct TranslationUnit {
    source: &'static TranslationSource,
    key: &'static str,
    localizer: Arc<Localizer>,
    cache: Mutex<Option<(u64, String)>>,
}

impl TranslationUnit {
    /// Binds `key` to the process-wide [`Localizer`].
    #[must_use]
    pub fn new(source: &'static TranslationSource, key: &'static str) -> Self {
        Self::with_localizer(source, key, Localizer::global())
    }

    #[must_use]
    pub fn with_localizer(
        source: &'static TranslationSource,
        key: &'static str,
        localizer: Arc<Localizer>,
    ) -> Self {
        Self { source, key, localizer, cache: Mutex::new(None) }
    }

    /// Full dotted path of the key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    #[must_use]
    pub const fn source_file(&self) -> &'static str {
        self.source.file()
    }

    /// Text for the current locale.
    ///
    /// # Errors
    /// Fails when the invariant document cannot be loaded.
    pub fn value(&self) -> Result<String, ProviderError> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let version = self.localizer.version();
        if let Some((_, value)) = cache.as_ref().filter(|(cached, _)| *cached == version) {
            return Ok(value.clone());
        }
        let value = self.localizer.resolve_current(self.source, self.key)?;
        *cache = Some((version, value.clone()));
        Ok(value)
    }

    /// Calls `on_change` with the new text after every locale switch.
    ///
    /// Keys that fail to resolve are logged and skipped.
    pub fn subscribe(&self, on_change: impl Fn(&str) + Send + Sync + 'static) -> Subscription {
        let registry = Arc::clone(self.localizer.registry());
        let source = self.source;
        let key = self.key;
        self.localizer.subscribe(move |locale| match resolve_with(&registry, source, key, locale) {
            Ok(value) => on_change(&value),
            Err(e) => tracing::error!(key, error = %e, "Failed to resolve translation after locale change"),
        })
    }
}
