//! 設定の読み込みとプロジェクト内パスの解決

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    EchoesSettings,
    loader,
};

/// Validated settings bound to the project root they were loaded from.
///
/// Every directory in the settings is relative to that root. The manager is
/// the one place that turns them into paths the generator can use.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    settings: EchoesSettings,
    project_root: PathBuf,
}

impl ConfigManager {
    /// `project_root` の `.echoes.json` を読み込んで検証する
    ///
    /// 設定ファイルがなければデフォルト値を使う
    ///
    /// # Errors
    /// - 設定ファイルの読み込み・パースエラー
    /// - バリデーションエラー
    pub fn load(project_root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let project_root = project_root.into();
        let settings = loader::read_project_settings(&project_root)?.unwrap_or_default();
        Self::with_settings(project_root, settings)
    }

    /// Binds already built settings to a project root.
    ///
    /// # Errors
    /// Returns [`ConfigError::ValidationErrors`] when the settings are invalid.
    pub fn with_settings(project_root: impl Into<PathBuf>, settings: EchoesSettings) -> Result<Self, ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        let project_root = project_root.into();
        tracing::debug!(project_root = %project_root.display(), ?settings, "Settings ready");
        Ok(Self { settings, project_root })
    }

    /// Replaces `outputDir`, e.g. from the command line.
    ///
    /// Relative values stay relative to the project root. The settings are
    /// left unchanged when the new value does not validate.
    ///
    /// # Errors
    /// Returns [`ConfigError::ValidationErrors`] when the directory is empty.
    pub fn override_output_dir(&mut self, output_dir: &Path) -> Result<(), ConfigError> {
        let settings = EchoesSettings {
            output_dir: output_dir.to_string_lossy().to_string(),
            ..self.settings.clone()
        };
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        tracing::debug!(output_dir = %settings.output_dir, "Output directory overridden");
        self.settings = settings;
        Ok(())
    }

    #[must_use]
    pub const fn settings(&self) -> &EchoesSettings {
        &self.settings
    }

    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Prefix stripped from document paths: `projectDir` under the project root.
    ///
    /// An empty `projectDir` yields the project root, so generated files embed
    /// root-relative paths.
    #[must_use]
    pub fn document_base(&self) -> PathBuf {
        self.project_root.join(&self.settings.project_dir)
    }

    /// Where generated sources are written. Absolute `outputDir` values are used as they are.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.project_root.join(&self.settings.output_dir)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::CONFIG_FILE_NAME;

    fn project_with(content: &str) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), content).unwrap();
        temp_dir
    }

    #[googletest::test]
    fn load_without_settings_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();

        let manager = ConfigManager::load(temp_dir.path()).unwrap();

        expect_that!(*manager.settings(), eq(&EchoesSettings::default()));
        expect_that!(manager.output_dir(), eq(&temp_dir.path().join("src/generated")));
    }

    #[googletest::test]
    fn load_rejects_invalid_settings() {
        let project = project_with(r#"{"includePatterns": [], "runtimeCrate": "echoes-rt"}"#);

        let result = ConfigManager::load(project.path());

        expect_that!(
            result,
            err(all![
                displays_as(contains_substring("includePatterns")),
                displays_as(contains_substring("runtimeCrate"))
            ])
        );
    }

    #[rstest]
    #[case::empty_is_root("", "")]
    #[case::subdirectory("App", "App")]
    #[case::nested("src/App", "src/App")]
    fn document_base_is_resolved_against_root(#[case] project_dir: &str, #[case] expected: &str) {
        let settings = EchoesSettings { project_dir: project_dir.to_string(), ..EchoesSettings::default() };

        let manager = ConfigManager::with_settings("/work/app", settings).unwrap();

        assert_that!(manager.document_base(), eq(&Path::new("/work/app").join(expected)));
    }

    #[googletest::test]
    fn empty_project_dir_yields_root_relative_document_paths() {
        let manager = ConfigManager::with_settings("/work/app", EchoesSettings::default()).unwrap();

        let document = Path::new("/work/app/i18n/strings.toml");
        let relative = document.strip_prefix(manager.document_base()).unwrap().to_path_buf();

        expect_that!(relative, eq(&PathBuf::from("i18n/strings.toml")));
    }

    #[googletest::test]
    fn output_dir_override_is_validated() {
        let project = project_with(r#"{"outputDir": "gen"}"#);
        let mut manager = ConfigManager::load(project.path()).unwrap();

        expect_that!(manager.override_output_dir(Path::new("")), err(anything()));
        expect_that!(manager.settings().output_dir, eq("gen"));

        manager.override_output_dir(Path::new("out/i18n")).unwrap();
        expect_that!(manager.output_dir(), eq(&project.path().join("out/i18n")));
    }

    #[googletest::test]
    fn absolute_output_dir_is_kept() {
        let mut manager = ConfigManager::with_settings("/work/app", EchoesSettings::default()).unwrap();

        manager.override_output_dir(Path::new("/tmp/generated")).unwrap();

        expect_that!(manager.output_dir(), eq(&PathBuf::from("/tmp/generated")));
    }
}
