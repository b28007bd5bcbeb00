//! Selection of translation documents by glob.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::EchoesSettings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid glob '{pattern}' in {setting}: {source}")]
    InvalidPattern {
        setting: &'static str,
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Decides which files below the project root are translation documents.
///
/// A file qualifies when its root-relative path matches `includePatterns` and
/// none of `excludePatterns`. With file overrides enabled, everything under
/// `fileOverrides.root` is excluded too: those copies replace compiled-in
/// documents at run time and are never compiled themselves.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    project_root: PathBuf,
    include: GlobSet,
    exclude: GlobSet,
}

impl FileMatcher {
    /// # Errors
    /// Returns a [`MatcherError`] when a pattern is not a valid glob.
    pub fn new(project_root: PathBuf, settings: &EchoesSettings) -> Result<Self, MatcherError> {
        let include = glob_set("includePatterns", settings.include_patterns.iter().cloned())?;

        let override_dir = override_exclusion(&project_root, settings);
        if let Some(pattern) = &override_dir {
            tracing::debug!(pattern, "Excluding override directory from documents");
        }
        let exclude =
            glob_set("excludePatterns", settings.exclude_patterns.iter().cloned().chain(override_dir))?;

        Ok(Self { project_root, include, exclude })
    }

    /// Whether `path`, which must lie below the project root, is a document.
    #[must_use]
    pub fn is_document(&self, path: &Path) -> bool {
        path.strip_prefix(&self.project_root)
            .is_ok_and(|relative| self.include.is_match(relative) && !self.exclude.is_match(relative))
    }
}

fn glob_set(setting: &'static str, patterns: impl Iterator<Item = String>) -> Result<GlobSet, MatcherError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(&pattern) {
            Ok(glob) => builder.add(glob),
            Err(source) => return Err(MatcherError::InvalidPattern { setting, pattern, source }),
        };
    }
    Ok(builder.build()?)
}

/// `<root>/**` for an enabled override root inside the project, relative to the project root.
fn override_exclusion(project_root: &Path, settings: &EchoesSettings) -> Option<String> {
    let overrides = &settings.file_overrides;
    if !overrides.enabled {
        return None;
    }
    let relative = if overrides.root.is_absolute() {
        overrides.root.strip_prefix(project_root).ok()?
    } else {
        overrides.root.as_path()
    };
    let relative = relative.to_string_lossy().replace('\\', "/");
    let relative = relative.trim_start_matches("./").trim_matches('/');
    (!relative.is_empty() && relative != ".").then(|| format!("{}/**", globset::escape(relative)))
}
