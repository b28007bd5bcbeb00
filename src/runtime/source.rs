//! Identity of a compiled translation document.

use crate::runtime::resources::ResourceSet;

/// The resource set a document family was compiled into, plus the relative
/// path of its invariant document.
///
/// Generated code declares one of these per document as a `static`. The
/// relative path is the key under which the provider registry caches the
/// document's [`ResourceProvider`](crate::runtime::provider::ResourceProvider).
#[derive(Debug, Clone, Copy)]
pub struct TranslationSource {
    resources: &'static dyn ResourceSet,
    file: &'static str,
}

impl TranslationSource {
    #[must_use]
    pub const fn new(resources: &'static dyn ResourceSet, file: &'static str) -> Self {
        Self { resources, file }
    }

    #[must_use]
    pub const fn resources(&self) -> &'static dyn ResourceSet {
        self.resources
    }

    /// Relative path of the invariant document, e.g. `i18n/strings.toml`.
    #[must_use]
    pub const fn file(&self) -> &'static str {
        self.file
    }
}
