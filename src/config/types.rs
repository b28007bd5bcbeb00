use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to read configuration file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Contents of `.echoes.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EchoesSettings {
    /// Directory, relative to the project root, whose prefix is stripped from
    /// document paths to form the relative path embedded in generated code.
    ///
    /// Resolved by [`ConfigManager::document_base`](super::ConfigManager::document_base):
    /// empty means the project root itself, so generated paths are always
    /// root-relative. Only a direct [`generate_file`](crate::codegen::generate_file)
    /// call with an empty prefix keeps the raw document path.
    pub project_dir: String,

    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,

    /// Directory generated sources are written to, relative to the project root.
    pub output_dir: String,

    /// Rust path of the resource set generated code reads documents from.
    pub resources_path: String,

    /// Path of the runtime crate as seen from generated code.
    pub runtime_crate: String,

    pub file_overrides: FileOverrideConfig,
}

/// On-disk documents that take precedence over compiled-in ones.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileOverrideConfig {
    pub enabled: bool,
    pub root: PathBuf,
}

impl Default for FileOverrideConfig {
    fn default() -> Self {
        Self { enabled: false, root: PathBuf::from("translations") }
    }
}

impl EchoesSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - `resourcesPath` or `runtimeCrate` is not a Rust path
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "includePatterns",
                "At least one pattern is required. Example: [\"**/*.toml\"]",
            ));
        }

        for (index, pattern) in self.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.output_dir.is_empty() {
            errors.push(ValidationError::new(
                "outputDir",
                "The directory cannot be empty. Example: \"src/generated\"",
            ));
        }

        if !is_rust_path(&self.resources_path) {
            errors.push(ValidationError::new(
                "resourcesPath",
                format!(
                    "'{}' is not a Rust path. Example: \"crate::TRANSLATIONS\"",
                    self.resources_path
                ),
            ));
        }

        if !is_rust_path(&self.runtime_crate) {
            errors.push(ValidationError::new(
                "runtimeCrate",
                format!("'{}' is not a Rust path. Example: \"echoes\"", self.runtime_crate),
            ));
        }

        if self.file_overrides.enabled && self.file_overrides.root.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "fileOverrides.root",
                "The directory cannot be empty when overrides are enabled",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// `::`-separated identifiers, optionally starting with `::`.
fn is_rust_path(path: &str) -> bool {
    let path = path.strip_prefix("::").unwrap_or(path);
    !path.is_empty()
        && path.split("::").all(|segment| {
            let mut chars = segment.chars();
            chars.next().is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
                && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
                && segment != "_"
        })
}

impl Default for EchoesSettings {
    fn default() -> Self {
        Self {
            project_dir: String::new(),
            include_patterns: vec!["**/*.toml".to_string()],
            exclude_patterns: vec!["target/**".to_string()],
            output_dir: "src/generated".to_string(),
            resources_path: "crate::TRANSLATIONS".to_string(),
            runtime_crate: "echoes".to_string(),
            file_overrides: FileOverrideConfig::default(),
        }
    }
}
