//! Parsed input documents.
pub mod document;
