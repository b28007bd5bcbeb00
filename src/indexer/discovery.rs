//! Locale variant discovery.
//!
//! A document family is a base document such as `strings.toml` plus siblings
//! named `strings_<locale>.toml`. Discovery lists the siblings available to a
//! running program, in the compiled-in resource set and in the override
//! directory, and turns their suffixes into locale identifiers.

use std::path::Path;

use globset::{
    GlobBuilder,
    GlobMatcher,
};
use ignore::WalkBuilder;

use crate::indexer::types::IndexerError;
use crate::locale::LocaleId;
use crate::runtime::resources::ResourceSet;

/// Lists the locale variants of `base_name` (a file stem such as `strings`).
///
/// Compiled-in names come first, sorted, followed by the files directly inside
/// `disk_dir`, sorted. The two lists are concatenated as they are, so a variant
/// present in both appears twice. Pass `None` for `disk_dir` when file
/// overrides are disabled.
///
/// # Errors
/// Returns [`IndexerError::InvalidPattern`] when no glob can be built for `base_name`.
pub fn list_variants(
    embedded: &dyn ResourceSet,
    disk_dir: Option<&Path>,
    base_name: &str,
) -> Result<Vec<String>, IndexerError> {
    let matcher = variant_matcher(base_name)?;

    let mut embedded_names: Vec<String> =
        embedded.names().into_iter().filter(|name| matcher.is_match(file_name(name))).collect();
    embedded_names.sort();

    let mut disk_names = disk_dir.map(|dir| list_directory(dir, &matcher)).unwrap_or_default();
    disk_names.sort();

    tracing::debug!(
        base_name,
        embedded = embedded_names.len(),
        disk = disk_names.len(),
        "Listed locale variants"
    );
    embedded_names.extend(disk_names);
    Ok(embedded_names)
}

/// Locale identifiers named by variant file names, in input order.
///
/// `strings_de-AT.toml` yields `de-AT`. Names that do not belong to
/// `base_name` or whose suffix is not a locale identifier are skipped.
#[must_use]
pub fn culture_ids_of<S: AsRef<str>>(file_names: &[S], base_name: &str) -> Vec<LocaleId> {
    let prefix = format!("{}_", base_name.to_lowercase());
    file_names
        .iter()
        .filter_map(|name| {
            let name = file_name(name.as_ref());
            let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
            let Some(suffix) = stem.to_lowercase().strip_prefix(&prefix).map(str::to_string) else {
                tracing::debug!(file = name, base_name, "Not a variant of the base document");
                return None;
            };
            match LocaleId::parse(&suffix) {
                Ok(locale) => Some(locale),
                Err(e) => {
                    tracing::debug!(file = name, error = %e, "Skipping variant with unknown locale");
                    None
                }
            }
        })
        .collect()
}

fn variant_matcher(base_name: &str) -> Result<GlobMatcher, IndexerError> {
    let pattern = format!("{}_*", globset::escape(base_name));
    GlobBuilder::new(&pattern)
        .case_insensitive(true)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| IndexerError::InvalidPattern { pattern, source })
}

fn list_directory(dir: &Path, matcher: &GlobMatcher) -> Vec<String> {
    WalkBuilder::new(dir)
        .standard_filters(false)
        .follow_links(false)
        .max_depth(Some(1))
        .build()
        .filter_map(|result| match result {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| entry.file_name().to_str().is_some_and(|name| matcher.is_match(name)))
        .map(|entry| entry.path().to_string_lossy().to_string())
        .collect()
}

fn file_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}
