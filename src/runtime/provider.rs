//! Per-document translation lookup with locale fallback.
//!
//! Resolution order for a requested locale such as `de-AT`:
//!
//! 1. the specific sibling (`strings_de-AT.toml`)
//! 2. the language-only sibling (`strings_de.toml`)
//! 3. the invariant document (`strings.toml`)
//! 4. the missing-translation sentinel
//!
//! The two locale layers are cached for the most recently requested locale.
//! Requesting another locale replaces them; the invariant map never changes.

use std::collections::HashMap;
use std::sync::{
    Mutex,
    PoisonError,
};

use thiserror::Error;

use crate::config::FileOverrideConfig;
use crate::input::document::{
    DocumentError,
    TranslationDocument,
};
use crate::locale::LocaleId;
use crate::runtime::resources::{
    DirectoryResources,
    ResourceSet,
    normalize_name,
};

/// Prefix of the value returned for keys missing from every fallback tier.
pub const MISSING_TRANSLATION_PREFIX: &str = "TRANSLATION NOT FOUND: ";

type TranslationMap = HashMap<String, String>;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// The invariant document is in none of the configured sources.
    #[error("Translation resource '{file}' could not be found")]
    InvariantMissing { file: String },

    /// The invariant document exists but cannot be parsed.
    #[error("Translation resource '{file}' is invalid: {source}")]
    InvariantInvalid {
        file: String,
        #[source]
        source: DocumentError,
    },
}

/// Reads documents from the embedded set and, when enabled, from disk.
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    embedded: &'static dyn ResourceSet,
    disk: Option<DirectoryResources>,
}

impl ResourceLoader {
    #[must_use]
    pub fn new(embedded: &'static dyn ResourceSet, overrides: &FileOverrideConfig) -> Self {
        let disk = overrides.enabled.then(|| DirectoryResources::new(&overrides.root));
        Self { embedded, disk }
    }

    #[must_use]
    pub const fn embedded_only(embedded: &'static dyn ResourceSet) -> Self {
        Self { embedded, disk: None }
    }

    /// Loads one document as a flat key map.
    ///
    /// When both sources have the document, disk entries replace embedded
    /// entries key by key. Returns `Ok(None)` when neither source has it.
    ///
    /// # Errors
    /// Returns a [`DocumentError`] when either copy fails to parse.
    pub fn load(&self, name: &str) -> Result<Option<TranslationMap>, DocumentError> {
        let embedded = self.embedded.read(name);
        let disk = self.disk.as_ref().and_then(|disk| disk.read(name));
        tracing::debug!(
            resource = name,
            embedded = embedded.is_some(),
            disk = disk.is_some(),
            "Loading translation resource"
        );

        let mut merged: Option<TranslationMap> = None;
        for text in [embedded, disk].into_iter().flatten() {
            let entries = TranslationDocument::parse(&text)?.flatten()?;
            merged.get_or_insert_with(HashMap::new).extend(entries);
        }
        Ok(merged)
    }
}

/// Cached layers for one requested locale.
#[derive(Debug)]
struct LocaleLayers {
    locale: LocaleId,
    specific: Option<TranslationMap>,
    language: Option<TranslationMap>,
}

/// Resolves keys of one document.
#[derive(Debug)]
pub struct ResourceProvider {
    file: String,
    loader: ResourceLoader,
    invariant: TranslationMap,
    layers: Mutex<Option<LocaleLayers>>,
}

impl ResourceProvider {
    /// Loads the invariant document.
    ///
    /// # Errors
    /// Fails when the invariant document is missing or invalid.
    pub fn new(file: &str, loader: ResourceLoader) -> Result<Self, ProviderError> {
        let invariant = match loader.load(file) {
            Ok(Some(map)) => map,
            Ok(None) => return Err(ProviderError::InvariantMissing { file: file.to_string() }),
            Err(source) => {
                return Err(ProviderError::InvariantInvalid { file: file.to_string(), source });
            }
        };
        tracing::debug!(file, keys = invariant.len(), "Created translation provider");

        Ok(Self { file: file.to_string(), loader, invariant, layers: Mutex::new(None) })
    }

    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Resolves `key` for `locale`, falling back from specific to language-only
    /// to invariant. Keys missing everywhere yield the sentinel text.
    #[must_use]
    pub fn resolve(&self, key: &str, locale: &LocaleId) -> String {
        let mut guard = self.layers.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.as_ref().is_none_or(|layers| layers.locale != *locale) {
            *guard = Some(self.load_layers(locale));
        }
        let layers = guard.as_ref();

        let hit = layers
            .and_then(|l| l.specific.as_ref())
            .and_then(|map| map.get(key))
            .or_else(|| layers.and_then(|l| l.language.as_ref()).and_then(|map| map.get(key)))
            .or_else(|| self.invariant.get(key));

        if let Some(value) = hit {
            return value.clone();
        }
        tracing::warn!(file = %self.file, key, locale = %locale, "Translation not found");
        format!("{MISSING_TRANSLATION_PREFIX}{key}")
    }

    fn load_layers(&self, locale: &LocaleId) -> LocaleLayers {
        tracing::debug!(file = %self.file, locale = %locale, "Loading locale layers");
        if locale.is_invariant() {
            return LocaleLayers { locale: locale.clone(), specific: None, language: None };
        }

        let specific = self.load_sibling(&locale.name());
        let language = locale.language_only().and_then(|language| self.load_sibling(&language.name()));
        LocaleLayers { locale: locale.clone(), specific, language }
    }

    fn load_sibling(&self, suffix: &str) -> Option<TranslationMap> {
        let name = sibling_name(&self.file, suffix);
        match self.loader.load(&name) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(resource = %name, error = %e, "Ignoring invalid translation resource");
                None
            }
        }
    }
}

/// Name of the locale sibling of `file`: `i18n/strings.toml` + `de` is `i18n/strings_de.toml`.
#[must_use]
pub fn sibling_name(file: &str, suffix: &str) -> String {
    let file = normalize_name(file);
    let (dir, file_name) = file.rsplit_once('/').unwrap_or(("", file.as_str()));
    let sibling = match file_name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => format!("{stem}_{suffix}.{extension}"),
        _ => format!("{file_name}_{suffix}"),
    };
    if dir.is_empty() { sibling } else { format!("{dir}/{sibling}") }
}
