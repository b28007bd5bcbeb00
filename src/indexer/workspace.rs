//! プロジェクト内の翻訳ドキュメント探索
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use crate::config::{
    EchoesSettings,
    FileMatcher,
};
use crate::indexer::types::IndexerError;

/// 翻訳ドキュメントの候補を検索
///
/// `includePatterns` に一致し `excludePatterns` に一致しないファイルを、
/// パス順にソートして返す。`.gitignore` は尊重する。
///
/// # Errors
/// - パターンが不正
/// - プロジェクトルートがディレクトリでない
pub fn find_documents(project_root: &Path, settings: &EchoesSettings) -> Result<Vec<PathBuf>, IndexerError> {
    tracing::debug!(project_root = %project_root.display(), "Searching translation documents");
    if !project_root.is_dir() {
        return Err(IndexerError::InvalidPath(project_root.display().to_string()));
    }
    let matcher = FileMatcher::new(project_root.to_path_buf(), settings)?;

    let mut found_files = Vec::new();
    // ignore クレートでファイルを走査
    for result in WalkBuilder::new(project_root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        // ファイルのみを対象
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        if matcher.is_document(entry.path()) {
            found_files.push(entry.path().to_path_buf());
        }
    }

    found_files.sort();
    tracing::debug!(count = found_files.len(), "Found translation documents");
    Ok(found_files)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use tempfile::TempDir;

    use super::*;
    use crate::config::FileOverrideConfig;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[googletest::test]
    fn finds_documents_with_default_settings() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "i18n/strings.toml");
        touch(root, "i18n/strings_de.toml");
        touch(root, "Cargo.toml");
        touch(root, "target/debug/copy.toml");
        touch(root, "src/main.rs");

        let files = find_documents(root, &EchoesSettings::default()).unwrap();

        expect_that!(
            relative(root, &files),
            elements_are![eq("Cargo.toml"), eq("i18n/strings.toml"), eq("i18n/strings_de.toml")]
        );
    }

    #[googletest::test]
    fn respects_include_patterns() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "i18n/strings.toml");
        touch(root, "Cargo.toml");
        let settings = EchoesSettings {
            include_patterns: vec!["i18n/**/*.toml".to_string()],
            ..EchoesSettings::default()
        };

        let files = find_documents(root, &settings).unwrap();

        expect_that!(relative(root, &files), elements_are![eq("i18n/strings.toml")]);
    }

    #[googletest::test]
    fn skips_override_copies() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "i18n/strings.toml");
        touch(root, "translations/i18n/strings.toml");
        let settings = EchoesSettings {
            file_overrides: FileOverrideConfig { enabled: true, root: PathBuf::from("translations") },
            ..EchoesSettings::default()
        };

        let files = find_documents(root, &settings).unwrap();

        expect_that!(relative(root, &files), elements_are![eq("i18n/strings.toml")]);
    }

    #[googletest::test]
    fn invalid_patterns_fail() {
        let temp_dir = TempDir::new().unwrap();
        let settings =
            EchoesSettings { include_patterns: vec!["[".to_string()], ..EchoesSettings::default() };

        expect_that!(find_documents(temp_dir.path(), &settings), err(anything()));
    }

    #[googletest::test]
    fn missing_root_fails() {
        let temp_dir = TempDir::new().unwrap();

        let result = find_documents(&temp_dir.path().join("missing"), &EchoesSettings::default());

        expect_that!(result, err(displays_as(contains_substring("missing"))));
    }
}
