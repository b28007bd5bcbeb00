//! Accessor generation for translation documents.
//!
//! Each compilable document (one carrying an `[echoes_config]` section) becomes
//! one Rust source file. Documents are processed independently: a document
//! that fails to parse or to generate is reported and its siblings still
//! generate.

pub mod descriptor;
pub mod emitter;
pub mod ident;

use std::fmt;
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

pub use self::descriptor::DocumentDescriptor;
use crate::config::EchoesSettings;
use crate::input::document::{
    CONFIG_SECTION,
    DocumentError,
};

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(
        "Names '{first}' and '{second}' in scope '{scope}' both map to the identifier '{identifier}'"
    )]
    IdentifierCollision { scope: String, identifier: String, first: String, second: String },

    #[error("Failed to format generated source: {0}")]
    Format(#[from] fmt::Error),

    #[error("I/O error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Paths generated code uses to reach the runtime and the compiled resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Runtime crate, e.g. `echoes` or `::my_app::echoes`.
    pub runtime_crate: String,
    /// Expression naming the `&'static` resource set, e.g. `crate::TRANSLATIONS`.
    pub resources_path: String,
}

impl GeneratorOptions {
    /// The runtime crate as an absolute path when it is a bare crate name.
    #[must_use]
    pub fn runtime_path(&self) -> String {
        if self.runtime_crate.contains("::") {
            self.runtime_crate.clone()
        } else {
            format!("::{}", self.runtime_crate)
        }
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self { runtime_crate: "echoes".to_string(), resources_path: "crate::TRANSLATIONS".to_string() }
    }
}

impl From<&EchoesSettings> for GeneratorOptions {
    fn from(settings: &EchoesSettings) -> Self {
        Self {
            runtime_crate: settings.runtime_crate.clone(),
            resources_path: settings.resources_path.clone(),
        }
    }
}

/// Generated source for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output file name, `<stem>.rs`.
    pub file_name: String,
    /// Relative path of the source document.
    pub relative_path: String,
    pub source: String,
}

/// What happened to one document of a batch.
#[derive(Debug)]
pub enum GenerationOutcome {
    Generated(GeneratedFile),
    /// Not compilable on its own (a locale variant).
    Skipped,
    Failed(CodegenError),
}

#[derive(Debug)]
pub struct DocumentResult {
    pub path: PathBuf,
    pub outcome: GenerationOutcome,
}

/// Generates the accessors of one document.
///
/// Returns `Ok(None)` for documents that are not compilable on their own.
/// Text that never mentions the configuration section is skipped without being
/// parsed, so broken locale variants do not fail the build.
///
/// # Errors
/// Returns a [`CodegenError`] when the document is invalid or its names
/// cannot be mapped to distinct identifiers.
pub fn generate_file(
    text: &str,
    path: &Path,
    project_dir: &Path,
    options: &GeneratorOptions,
) -> Result<Option<GeneratedFile>, CodegenError> {
    if !text.contains(CONFIG_SECTION) {
        return Ok(None);
    }
    let Some(descriptor) = DocumentDescriptor::extract(text, path, project_dir)? else {
        return Ok(None);
    };

    let source = emitter::emit(&descriptor, options)?;
    tracing::debug!(
        document = %descriptor.relative_path,
        keys = descriptor.root_group.all_entries().len(),
        "Generated accessors"
    );
    Ok(Some(GeneratedFile {
        file_name: format!("{}.rs", descriptor.stem()),
        relative_path: descriptor.relative_path,
        source,
    }))
}

/// Reads and generates every document in `paths`, in order.
#[must_use]
pub fn generate_batch(
    paths: &[PathBuf],
    project_dir: &Path,
    options: &GeneratorOptions,
) -> Vec<DocumentResult> {
    paths
        .iter()
        .map(|path| {
            let outcome = match std::fs::read_to_string(path) {
                Ok(text) => match generate_file(&text, path, project_dir, options) {
                    Ok(Some(file)) => GenerationOutcome::Generated(file),
                    Ok(None) => GenerationOutcome::Skipped,
                    Err(e) => {
                        tracing::warn!("Failed to generate accessors for {:?}: {}", path, e);
                        GenerationOutcome::Failed(e)
                    }
                },
                Err(source) => {
                    tracing::warn!("Failed to read {:?}: {}", path, source);
                    GenerationOutcome::Failed(CodegenError::Io { path: path.clone(), source })
                }
            };
            DocumentResult { path: path.clone(), outcome }
        })
        .collect()
}

/// Writes `file` into `out_dir`, creating the directory when needed.
///
/// # Errors
/// Returns [`CodegenError::Io`] when the directory or file cannot be written.
pub fn write_generated(file: &GeneratedFile, out_dir: &Path) -> Result<PathBuf, CodegenError> {
    std::fs::create_dir_all(out_dir)
        .map_err(|source| CodegenError::Io { path: out_dir.to_path_buf(), source })?;
    let path = out_dir.join(&file.file_name);
    std::fs::write(&path, &file.source)
        .map_err(|source| CodegenError::Io { path: path.clone(), source })?;
    Ok(path)
}
