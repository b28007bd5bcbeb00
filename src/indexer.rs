//! Build-time document enumeration and run-time variant discovery.
pub mod discovery;
pub mod types;
pub mod workspace;

pub use discovery::{
    culture_ids_of,
    list_variants,
};
pub use types::IndexerError;
pub use workspace::find_documents;
