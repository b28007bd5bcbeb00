//! Run-time translation lookup.
//!
//! Generated accessors hand out [`TranslationUnit`]s. A unit asks the
//! [`Localizer`] for its text, which finds the document's [`ResourceProvider`]
//! in the [`ProviderRegistry`] and resolves the key for the current locale.
pub mod broadcaster;
pub mod localizer;
pub mod provider;
pub mod registry;
pub mod resources;
pub mod source;
pub mod unit;

pub use broadcaster::{
    LocaleBroadcaster,
    Subscription,
};
pub use localizer::Localizer;
pub use provider::{
    MISSING_TRANSLATION_PREFIX,
    ProviderError,
    ResourceLoader,
    ResourceProvider,
};
pub use registry::ProviderRegistry;
pub use resources::{
    DirectoryResources,
    EmbeddedResources,
    ResourceSet,
};
pub use source::TranslationSource;
pub use unit::TranslationUnit;
