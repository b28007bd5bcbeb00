//! Compilable documents and their generator inputs.

use std::path::Path;

use crate::input::document::{
    DocumentError,
    TranslationDocument,
};
use crate::ir::tree::TranslationGroup;
use crate::runtime::resources::normalize_name;

/// Everything the emitter needs to generate accessors for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDescriptor {
    /// Path relative to the project directory, with `/` separators. Used as the
    /// document's identity at run time.
    pub relative_path: String,
    pub namespace: String,
    pub class_name: String,
    pub root_group: TranslationGroup,
}

impl DocumentDescriptor {
    /// Extracts the descriptor of the document at `path`.
    ///
    /// Returns `Ok(None)` for documents without a complete `[echoes_config]`
    /// section: those are locale variants and never compiled on their own.
    /// An empty `project_dir` keeps `path` unchanged, as does a path outside it.
    ///
    /// # Errors
    /// Returns a [`DocumentError`] when the text is not valid TOML or declares
    /// conflicting paths.
    pub fn extract(text: &str, path: &Path, project_dir: &Path) -> Result<Option<Self>, DocumentError> {
        let document = TranslationDocument::parse(text)?;
        let Some(config) = document.config() else {
            tracing::debug!(path = %path.display(), "No generator configuration, treating as locale variant");
            return Ok(None);
        };
        let root_group = document.tree()?;

        Ok(Some(Self {
            relative_path: relative_path(path, project_dir),
            namespace: config.namespace,
            class_name: config.class_name,
            root_group,
        }))
    }

    /// File stem of the document, e.g. `strings` for `i18n/strings.toml`.
    #[must_use]
    pub fn stem(&self) -> &str {
        let file_name = self.relative_path.rsplit('/').next().unwrap_or(&self.relative_path);
        match file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file_name,
        }
    }
}

fn relative_path(path: &Path, project_dir: &Path) -> String {
    let relative = if project_dir.as_os_str().is_empty() {
        path
    } else {
        path.strip_prefix(project_dir).unwrap_or(path)
    };
    normalize_name(&relative.to_string_lossy())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    const INVARIANT: &str = r#"
[echoes_config]
generated_class_name = "Strings"
generated_namespace = "App.Translations"

[translations]
title = "Title"
"#;

    #[googletest::test]
    fn extracts_compilable_document() {
        let descriptor =
            DocumentDescriptor::extract(INVARIANT, Path::new("/work/app/i18n/strings.toml"), Path::new("/work/app"))
                .unwrap()
                .unwrap();

        expect_that!(descriptor.relative_path, eq("i18n/strings.toml"));
        expect_that!(descriptor.namespace, eq("App.Translations"));
        expect_that!(descriptor.class_name, eq("Strings"));
        expect_that!(descriptor.root_group.find("title").is_some(), eq(true));
        expect_that!(descriptor.stem(), eq("strings"));
    }

    #[rstest]
    #[case::empty_project_dir("/work/app/strings.toml", "", "/work/app/strings.toml")]
    #[case::outside_project_dir("/other/strings.toml", "/work/app", "/other/strings.toml")]
    #[case::trailing_separator("/work/app/strings.toml", "/work/app/", "strings.toml")]
    #[case::relative_input("i18n/strings.toml", "", "i18n/strings.toml")]
    fn relative_paths(#[case] path: &str, #[case] project_dir: &str, #[case] expected: &str) {
        let descriptor =
            DocumentDescriptor::extract(INVARIANT, Path::new(path), Path::new(project_dir))
                .unwrap()
                .unwrap();

        assert_that!(descriptor.relative_path, eq(expected));
    }

    #[rstest]
    #[case::no_config_section("[translations]\ntitle = \"Titel\"")]
    #[case::missing_namespace("[echoes_config]\ngenerated_class_name = \"Strings\"")]
    #[case::missing_class_name("[echoes_config]\ngenerated_namespace = \"App\"")]
    #[case::wrong_kind("[echoes_config]\ngenerated_class_name = 1\ngenerated_namespace = \"App\"")]
    #[case::config_not_a_table("echoes_config = \"Strings\"")]
    fn variants_have_no_descriptor(#[case] text: &str) {
        let result = DocumentDescriptor::extract(text, Path::new("strings_de.toml"), Path::new(""));

        assert_that!(result.unwrap(), none());
    }

    #[googletest::test]
    fn variant_with_conflicting_paths_is_not_an_error() {
        let text = "[translations]\ndialog = \"x\"\n[dialog]\nok = \"y\"";

        let result = DocumentDescriptor::extract(text, Path::new("strings_de.toml"), Path::new(""));

        expect_that!(result.unwrap(), none());
    }

    #[googletest::test]
    fn conflicting_compilable_document_fails() {
        let text = format!("{INVARIANT}\n[title]\nshort = \"T\"");

        let result = DocumentDescriptor::extract(&text, Path::new("strings.toml"), Path::new(""));

        expect_that!(result, err(displays_as(contains_substring("title"))));
    }

    #[googletest::test]
    fn invalid_toml_fails() {
        let result = DocumentDescriptor::extract("[translations", Path::new("strings.toml"), Path::new(""));

        expect_that!(result, err(anything()));
    }
}
