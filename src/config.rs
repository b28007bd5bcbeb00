//! Project settings for the generator and runtime overrides.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Document file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    EchoesSettings,
    FileOverrideConfig,
    ValidationError,
};
