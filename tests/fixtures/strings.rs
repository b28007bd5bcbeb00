// @generated by echoes-gen from i18n/strings.toml. Do not edit.

#[allow(non_snake_case, dead_code)]
pub mod App {
    pub mod Translations {
        pub mod Strings {
            pub const FILE: &str = "i18n/strings.toml";

            pub static SOURCE: ::echoes::TranslationSource =
                ::echoes::TranslationSource::new(&crate::TRANSLATIONS, FILE);

            pub const KEYS: &[&str] = &[
                "Option.none",
                "dialog.cancel",
                "dialog.ok",
                "str.x",
                "title",
                "type",
            ];

            /// Unit for a full dotted key, or `None` when the document has no such key.
            pub fn lookup(key: &str) -> ::core::option::Option<::echoes::TranslationUnit> {
                KEYS.iter().copied().find(|k| *k == key).map(|k| ::echoes::TranslationUnit::new(&SOURCE, k))
            }

            pub fn title() -> ::echoes::TranslationUnit {
                ::echoes::TranslationUnit::new(&SOURCE, "title")
            }

            pub fn r#type() -> ::echoes::TranslationUnit {
                ::echoes::TranslationUnit::new(&SOURCE, "type")
            }

            pub mod Option {
                pub fn none() -> ::echoes::TranslationUnit {
                    ::echoes::TranslationUnit::new(&super::SOURCE, "Option.none")
                }
            }

            pub mod dialog {
                pub fn cancel() -> ::echoes::TranslationUnit {
                    ::echoes::TranslationUnit::new(&super::SOURCE, "dialog.cancel")
                }

                pub fn ok() -> ::echoes::TranslationUnit {
                    ::echoes::TranslationUnit::new(&super::SOURCE, "dialog.ok")
                }
            }

            pub mod str {
                pub fn x() -> ::echoes::TranslationUnit {
                    ::echoes::TranslationUnit::new(&super::SOURCE, "str.x")
                }
            }
        }
    }
}
