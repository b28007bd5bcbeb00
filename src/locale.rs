//! Locale identifiers.

use std::fmt;
use std::str::FromStr;

use icu_locale::{
    LanguageIdentifier,
    LocaleExpander,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Invalid locale identifier '{input}': {reason}")]
    Invalid { input: String, reason: String },
}

/// A BCP-47 language identifier such as `de`, `de-AT` or `zh-Hans-CN`.
///
/// The undetermined identifier (`und`) stands for the invariant locale: it has
/// no locale-specific resources and always resolves from the invariant document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleId(LanguageIdentifier);

impl LocaleId {
    /// Parses an identifier, accepting both `-` and `_` as subtag separators.
    ///
    /// # Errors
    /// Returns [`LocaleError::Invalid`] when the text is not a language identifier.
    pub fn parse(input: &str) -> Result<Self, LocaleError> {
        let normalized = input.trim().replace('_', "-");
        normalized
            .parse::<LanguageIdentifier>()
            .map(Self)
            .map_err(|e| LocaleError::Invalid { input: input.to_string(), reason: e.to_string() })
    }

    /// The invariant locale.
    #[must_use]
    pub fn invariant() -> Self {
        Self(icu_locale::langid!("und"))
    }

    /// The host's active locale, or the invariant locale when it cannot be determined.
    #[must_use]
    pub fn from_env() -> Self {
        let Some(raw) = sys_locale::get_locale() else {
            tracing::debug!("Host locale unavailable, using invariant locale");
            return Self::invariant();
        };
        // POSIX values may carry an encoding or modifier, e.g. `de_AT.UTF-8@euro`.
        let trimmed = raw.split(['.', '@']).next().unwrap_or_default();
        Self::parse(trimmed).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Host locale not understood, using invariant locale");
            Self::invariant()
        })
    }

    #[must_use]
    pub fn is_invariant(&self) -> bool {
        self.language() == "und" && self.0.script.is_none() && self.0.region.is_none()
    }

    /// Canonical name, e.g. `de-AT`.
    #[must_use]
    pub fn name(&self) -> String {
        self.0.to_string()
    }

    /// Language subtag, e.g. `de` for `de-AT`.
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.language.as_str()
    }

    /// The language-only form, when it differs from the full identifier.
    #[must_use]
    pub fn language_only(&self) -> Option<Self> {
        if self.language() == "und" {
            return None;
        }
        let language_only = Self::parse(self.language()).ok()?;
        (language_only != *self).then_some(language_only)
    }

    /// Whether the identifier names a language without a region.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.0.region.is_none()
    }

    /// Expands a neutral identifier to its most likely region (`de` becomes `de-DE`).
    ///
    /// Identifiers that already carry a region, and the invariant locale, are
    /// returned unchanged.
    #[must_use]
    pub fn with_default_region(&self) -> Self {
        if !self.is_neutral() || self.is_invariant() {
            return self.clone();
        }
        let mut expanded = self.0.clone();
        let _ = LocaleExpander::new_extended().maximize(&mut expanded);
        if self.0.script.is_none() {
            expanded.script = None;
        }
        Self(expanded)
    }

    #[must_use]
    pub const fn as_language_identifier(&self) -> &LanguageIdentifier {
        &self.0
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LocaleId {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<LanguageIdentifier> for LocaleId {
    fn from(id: LanguageIdentifier) -> Self {
        Self(id)
    }
}
