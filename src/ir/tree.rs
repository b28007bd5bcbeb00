//! 翻訳ツリーの中間表現
//!
//! A document's keys folded into groups and entries. Children live in ordered
//! maps, so two trees built from the same set of paths compare equal no matter
//! which order the paths were inserted in.

use std::collections::BTreeMap;

use thiserror::Error;

/// Separator between the segments of a translation key.
pub const KEY_SEPARATOR: char = '.';

/// A path was inserted twice, or used as both a leaf and a group.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("conflicting declarations for translation path '{path}'")]
pub struct PathConflict {
    /// The full dotted path at which the conflict was detected.
    pub path: String,
}

impl PathConflict {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Leaf of the translation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    /// Last segment of the key.
    pub local_name: String,
    /// Full dotted key, e.g. `dialog.ok`.
    pub full_path: String,
}

/// Interior node of the translation tree. The root group has an empty name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationGroup {
    pub name: String,
    pub entries: BTreeMap<String, TranslationEntry>,
    pub sub_groups: BTreeMap<String, Self>,
}

impl TranslationGroup {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), entries: BTreeMap::new(), sub_groups: BTreeMap::new() }
    }

    /// Creates the unnamed root group.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Inserts a leaf at `full_path`, creating the intermediate groups.
    ///
    /// # Errors
    /// Returns [`PathConflict`] when any prefix of `full_path` is already a leaf,
    /// when `full_path` is already a group, or when it was already inserted.
    pub fn insert(&mut self, full_path: &str) -> Result<(), PathConflict> {
        let mut segments: Vec<&str> = full_path.split(KEY_SEPARATOR).collect();
        let Some(last) = segments.pop() else {
            return Err(PathConflict::new(full_path));
        };

        let mut current = self;
        let mut walked = String::new();
        for segment in segments {
            if !walked.is_empty() {
                walked.push(KEY_SEPARATOR);
            }
            walked.push_str(segment);

            if current.entries.contains_key(segment) {
                return Err(PathConflict::new(walked));
            }
            current = current
                .sub_groups
                .entry(segment.to_string())
                .or_insert_with(|| Self::new(segment));
        }

        if current.entries.contains_key(last) || current.sub_groups.contains_key(last) {
            return Err(PathConflict::new(full_path));
        }
        current.entries.insert(
            last.to_string(),
            TranslationEntry { local_name: last.to_string(), full_path: full_path.to_string() },
        );
        Ok(())
    }

    /// Looks up the entry at a full dotted path.
    #[must_use]
    pub fn find(&self, full_path: &str) -> Option<&TranslationEntry> {
        let mut segments: Vec<&str> = full_path.split(KEY_SEPARATOR).collect();
        let last = segments.pop()?;
        let mut current = self;
        for segment in segments {
            current = current.sub_groups.get(segment)?;
        }
        current.entries.get(last)
    }

    /// All entries below this group, depth first, in emission order.
    #[must_use]
    pub fn all_entries(&self) -> Vec<&TranslationEntry> {
        let mut result: Vec<&TranslationEntry> = self.entries.values().collect();
        for group in self.sub_groups.values() {
            result.extend(group.all_entries());
        }
        result
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.sub_groups.is_empty()
    }
}
