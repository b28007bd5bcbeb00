//! Translation document input definitions
//!
//! Parses a TOML translation document and exposes the two derived views used by
//! the rest of the crate: the flattened key map (runtime) and the
//! [`TranslationGroup`] tree (code generation).

use std::collections::HashMap;

use thiserror::Error;
use toml::{
    Table,
    Value,
};

use crate::ir::tree::{
    KEY_SEPARATOR,
    PathConflict,
    TranslationGroup,
};

/// Section holding the generator configuration. Never part of the translations.
pub const CONFIG_SECTION: &str = "echoes_config";
/// Key inside [`CONFIG_SECTION`] naming the generated scope.
pub const CONFIG_CLASS_NAME_KEY: &str = "generated_class_name";
/// Key inside [`CONFIG_SECTION`] naming the enclosing namespace.
pub const CONFIG_NAMESPACE_KEY: &str = "generated_namespace";
/// Section whose members live at the root of the tree, without a prefix.
pub const TRANSLATIONS_SECTION: &str = "translations";

#[derive(Error, Debug)]
pub enum DocumentError {
    /// The text is not valid TOML, or TOML itself rejects a table redefinition.
    #[error("Failed to parse translation document: {0}")]
    Parse(#[from] toml::de::Error),

    /// A path is declared both as a value and as a table, or declared twice.
    #[error(transparent)]
    Conflict(#[from] PathConflict),
}

/// Generator configuration declared in the `[echoes_config]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentConfig {
    pub class_name: String,
    pub namespace: String,
}

/// A parsed translation document.
#[derive(Debug, Clone)]
pub struct TranslationDocument {
    root: Table,
}

impl TranslationDocument {
    /// Parses TOML text.
    ///
    /// # Errors
    /// Returns [`DocumentError::Parse`] on invalid TOML.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let root = text.parse::<Table>()?;
        Ok(Self { root })
    }

    /// Reads the `[echoes_config]` section.
    ///
    /// Returns `None` when the section is missing, is not a table, or lacks
    /// either string field. Such documents are locale variants, not errors.
    #[must_use]
    pub fn config(&self) -> Option<DocumentConfig> {
        let section = self.root.get(CONFIG_SECTION)?.as_table()?;
        let class_name = section.get(CONFIG_CLASS_NAME_KEY)?.as_str()?;
        let namespace = section.get(CONFIG_NAMESPACE_KEY)?.as_str()?;
        Some(DocumentConfig { class_name: class_name.to_string(), namespace: namespace.to_string() })
    }

    /// Flattens every string leaf into a dotted key map.
    ///
    /// # Errors
    /// Returns [`DocumentError::Conflict`] when two sections declare overlapping paths.
    pub fn flatten(&self) -> Result<HashMap<String, String>, DocumentError> {
        let mut result = HashMap::new();
        // The tree doubles as the conflict detector for the flat view.
        let mut seen = TranslationGroup::root();
        self.visit_leaves(&mut |path: &str, value: &str| {
            seen.insert(path)?;
            result.insert(path.to_string(), value.to_string());
            Ok(())
        })?;
        Ok(result)
    }

    /// Builds the translation tree.
    ///
    /// # Errors
    /// Returns [`DocumentError::Conflict`] when two sections declare overlapping paths.
    pub fn tree(&self) -> Result<TranslationGroup, DocumentError> {
        let mut root = TranslationGroup::root();
        self.visit_leaves(&mut |path: &str, _: &str| root.insert(path))?;
        Ok(root)
    }

    fn visit_leaves(
        &self,
        visit: &mut dyn FnMut(&str, &str) -> Result<(), PathConflict>,
    ) -> Result<(), PathConflict> {
        for (section_key, section) in &self.root {
            if section_key == CONFIG_SECTION {
                continue;
            }
            match section {
                Value::Table(table) if section_key == TRANSLATIONS_SECTION => {
                    visit_table(table, None, visit)?;
                }
                Value::Table(table) => visit_table(table, Some(section_key.as_str()), visit)?,
                Value::String(text) => visit(section_key.as_str(), text.as_str())?,
                _ => {
                    tracing::trace!(key = %section_key, "Skipping non-string top-level value");
                }
            }
        }
        Ok(())
    }
}

fn visit_table(
    table: &Table,
    prefix: Option<&str>,
    visit: &mut dyn FnMut(&str, &str) -> Result<(), PathConflict>,
) -> Result<(), PathConflict> {
    for (key, value) in table {
        let full_path = prefix.map_or_else(|| key.clone(), |p| format!("{p}{KEY_SEPARATOR}{key}"));
        match value {
            Value::String(text) => visit(full_path.as_str(), text.as_str())?,
            Value::Table(nested) => visit_table(nested, Some(full_path.as_str()), visit)?,
            _ => {
                tracing::trace!(key = %full_path, "Skipping non-string value");
            }
        }
    }
    Ok(())
}

/// Parses text and flattens it in one step.
///
/// # Errors
/// Returns a [`DocumentError`] for invalid TOML or conflicting paths.
pub fn parse_translations(text: &str) -> Result<HashMap<String, String>, DocumentError> {
    TranslationDocument::parse(text)?.flatten()
}

/// Parses text and builds the tree in one step.
///
/// # Errors
/// Returns a [`DocumentError`] for invalid TOML or conflicting paths.
pub fn build_translation_tree(text: &str) -> Result<TranslationGroup, DocumentError> {
    TranslationDocument::parse(text)?.tree()
}
