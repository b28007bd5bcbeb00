//! echoes
//!
//! TOML 翻訳ドキュメントから型付きアクセサを生成し、実行時にロケールのフォールバック付きで解決する
//!
//! Build time: [`codegen`] turns every document carrying an `[echoes_config]`
//! section into nested Rust modules with one accessor per key.
//! Run time: each accessor returns a [`TranslationUnit`] that resolves its key
//! for the current locale, falling back from `de-AT` to `de` to the invariant
//! document.

pub mod codegen;
pub mod config;
pub mod indexer;
pub mod input;
pub mod ir;
pub mod locale;
pub mod runtime;

mod test_utils;

// 生成コードから参照される型を再エクスポート
pub use locale::LocaleId;
pub use runtime::{
    EmbeddedResources,
    Localizer,
    ProviderError,
    ResourceSet,
    Subscription,
    TranslationSource,
    TranslationUnit,
};
