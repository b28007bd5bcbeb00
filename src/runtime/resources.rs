//! Resource sets holding translation documents.
//!
//! A resource set is the run-time counterpart of the document family a
//! generated scope was compiled from: the invariant document plus its locale
//! siblings, addressed by relative path.

use std::fmt;
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

/// A readable collection of translation documents.
pub trait ResourceSet: Send + Sync + fmt::Debug {
    /// Reads the document whose name matches `name` (see [`resource_name_matches`]).
    fn read(&self, name: &str) -> Option<String>;

    /// Names of every document in the set.
    fn names(&self) -> Vec<String>;
}

/// Normalizes path separators to `/`.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.replace('\\', "/")
}

/// Whether `candidate` names the resource `requested`.
///
/// Matching ignores case and separator style. A candidate matches when it is
/// equal to the requested name or ends with it on a path boundary, so
/// `i18n/strings_de.toml` matches `strings_de.toml` but
/// `i18n/otherstrings_de.toml` does not.
#[must_use]
pub fn resource_name_matches(candidate: &str, requested: &str) -> bool {
    let candidate = normalize_name(candidate).to_lowercase();
    let requested = normalize_name(requested).to_lowercase();
    let requested = requested.trim_start_matches("./");
    candidate == requested || candidate.ends_with(&format!("/{requested}"))
}

/// Documents compiled into the binary.
///
/// Usually built with [`embed_resources!`](crate::embed_resources).
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedResources {
    files: &'static [(&'static str, &'static str)],
}

impl EmbeddedResources {
    #[must_use]
    pub const fn new(files: &'static [(&'static str, &'static str)]) -> Self {
        Self { files }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ResourceSet for EmbeddedResources {
    fn read(&self, name: &str) -> Option<String> {
        self.files
            .iter()
            .find(|(candidate, _)| resource_name_matches(candidate, name))
            .map(|(_, contents)| (*contents).to_string())
    }

    fn names(&self) -> Vec<String> {
        self.files.iter().map(|(name, _)| normalize_name(name)).collect()
    }
}

/// Builds an [`EmbeddedResources`] from `name => path` pairs read with `include_str!`.
///
/// ```ignore
/// pub static TRANSLATIONS: echoes::EmbeddedResources = echoes::embed_resources![
///     "i18n/strings.toml" => "../i18n/strings.toml",
///     "i18n/strings_de.toml" => "../i18n/strings_de.toml",
/// ];
/// ```
#[macro_export]
macro_rules! embed_resources {
    ($($name:literal => $path:literal),* $(,)?) => {
        $crate::EmbeddedResources::new(&[$(($name, include_str!($path))),*])
    };
}

/// Documents read from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, name: &str) -> PathBuf {
        normalize_name(name).split('/').filter(|segment| !segment.is_empty()).fold(
            self.root.clone(),
            |path, segment| path.join(segment),
        )
    }
}

impl ResourceSet for DirectoryResources {
    fn read(&self, name: &str) -> Option<String> {
        let path = self.path_of(name);
        match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read translation override {:?}: {}", path, e);
                None
            }
        }
    }

    /// Files below the root as `/`-separated relative names, sorted.
    ///
    /// Hidden and ignored files are listed too. Names that are not valid
    /// UTF-8 can never be requested and are skipped.
    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .build()
            .filter_map(|result| match result {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::debug!(?err, "Failed to read override entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&self.root).ok()?;
                let name = relative.to_str();
                if name.is_none() {
                    tracing::debug!(path = ?entry.path(), "Skipping override with non UTF-8 name");
                }
                name.map(normalize_name)
            })
            .collect();
        names.sort();
        names
    }
}
