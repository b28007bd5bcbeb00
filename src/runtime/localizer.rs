//! Locale state and translation lookup shared by generated accessors.

use std::sync::{
    Arc,
    PoisonError,
    RwLock,
};

use crate::config::FileOverrideConfig;
use crate::locale::LocaleId;
use crate::runtime::broadcaster::{
    LocaleBroadcaster,
    Subscription,
};
use crate::runtime::provider::ProviderError;
use crate::runtime::registry::ProviderRegistry;
use crate::runtime::source::TranslationSource;

static GLOBAL: RwLock<Option<Arc<Localizer>>> = RwLock::new(None);

/// Owns the current locale and the provider registry.
///
/// Generated accessors use the process-wide instance returned by
/// [`Localizer::global`]. Tests and embedders can build their own and pass it
/// to [`TranslationUnit::with_localizer`](crate::TranslationUnit::with_localizer).
#[derive(Debug)]
pub struct Localizer {
    broadcaster: Arc<LocaleBroadcaster>,
    registry: Arc<ProviderRegistry>,
}

impl Localizer {
    #[must_use]
    pub fn new(initial: LocaleId, overrides: FileOverrideConfig) -> Self {
        Self {
            broadcaster: Arc::new(LocaleBroadcaster::new(initial)),
            registry: Arc::new(ProviderRegistry::new(overrides)),
        }
    }

    /// Starts in the host's locale without disk overrides.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(LocaleId::from_env(), FileOverrideConfig::default())
    }

    /// The process-wide instance, created from the environment on first use.
    #[must_use]
    pub fn global() -> Arc<Self> {
        if let Some(localizer) = GLOBAL.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Arc::clone(localizer);
        }
        let mut global = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(global.get_or_insert_with(|| {
            let localizer = Self::from_env();
            tracing::debug!(locale = %localizer.current_locale(), "Initialized global localizer");
            Arc::new(localizer)
        }))
    }

    /// Replaces the process-wide instance.
    ///
    /// Accessors created earlier keep the instance they captured.
    pub fn install(localizer: Arc<Self>) {
        *GLOBAL.write().unwrap_or_else(PoisonError::into_inner) = Some(localizer);
    }

    /// Drops the process-wide instance so the next [`global`](Self::global) call recreates it.
    pub fn reset() {
        *GLOBAL.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    #[must_use]
    pub fn current_locale(&self) -> Arc<LocaleId> {
        self.broadcaster.current()
    }

    /// Switches the current locale and notifies subscribers before returning.
    pub fn set_locale(&self, locale: LocaleId) {
        tracing::info!(locale = %locale, "Switching locale");
        self.broadcaster.set_locale(locale);
    }

    /// Resolves `key` of `source` for `locale`.
    ///
    /// # Errors
    /// Fails when the invariant document of `source` cannot be loaded.
    pub fn resolve(
        &self,
        source: &TranslationSource,
        key: &str,
        locale: &LocaleId,
    ) -> Result<String, ProviderError> {
        resolve_with(&self.registry, source, key, locale)
    }

    /// Resolves `key` of `source` for the current locale.
    ///
    /// # Errors
    /// Fails when the invariant document of `source` cannot be loaded.
    pub fn resolve_current(&self, source: &TranslationSource, key: &str) -> Result<String, ProviderError> {
        self.resolve(source, key, &self.current_locale())
    }

    /// Incremented on every locale switch.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.broadcaster.version()
    }

    /// Calls `on_change` after every locale switch until the subscription is dropped.
    pub fn subscribe(&self, on_change: impl Fn(&LocaleId) + Send + Sync + 'static) -> Subscription {
        self.broadcaster.subscribe(on_change)
    }

    #[must_use]
    pub const fn broadcaster(&self) -> &Arc<LocaleBroadcaster> {
        &self.broadcaster
    }

    #[must_use]
    pub const fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }
}

/// Resolution against a registry, shared with unit subscriptions.
pub(crate) fn resolve_with(
    registry: &ProviderRegistry,
    source: &TranslationSource,
    key: &str,
    locale: &LocaleId,
) -> Result<String, ProviderError> {
    Ok(registry.provider(source)?.resolve(key, locale))
}
