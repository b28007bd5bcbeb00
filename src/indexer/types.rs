//! Indexer type definitions.

use thiserror::Error;

use crate::config::MatcherError;

#[derive(Error, Debug)]
pub enum IndexerError {
    /// The configured include/exclude patterns could not be compiled
    #[error(transparent)]
    Matcher(#[from] MatcherError),
    /// A variant pattern built from a base name is not a valid glob
    #[error("Invalid variant pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    /// Error when the project root cannot be walked
    #[error("Failed to read directory: {0}")]
    InvalidPath(String),
}
