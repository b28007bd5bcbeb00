//! 生成から実行時解決までの結合テスト

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::path::Path;
use std::sync::{
    Arc,
    Mutex,
};

use echoes::codegen::{
    self,
    GenerationOutcome,
    GeneratorOptions,
};
use echoes::config::{
    ConfigManager,
    FileOverrideConfig,
};
use echoes::indexer::{
    culture_ids_of,
    find_documents,
    list_variants,
};
use echoes::{
    EmbeddedResources,
    LocaleId,
    Localizer,
    TranslationSource,
    TranslationUnit,
};
use googletest::prelude::*;
use tempfile::TempDir;

const STRINGS: &str = r#"
[echoes_config]
generated_class_name = "Strings"
generated_namespace = "App.Translations"

[translations]
title = "Testing Echoes"
dialog.ok = "Ok"
dialog.cancel = "Cancel"

[nested.level1.level2]
nestedstr1 = "Nesting"
"#;

const STRINGS_DE: &str = r#"
[translations]
title = "Echoes testen"
dialog.cancel = "Abbrechen"
"#;

const STRINGS_DE_AT: &str = r#"
[translations]
title = "Echoes ausprobieren"
"#;

const EXPECTED: &str = r#"// @generated by echoes-gen from i18n/strings.toml. Do not edit.

#[allow(non_snake_case, dead_code)]
pub mod App {
    pub mod Translations {
        pub mod Strings {
            pub const FILE: &str = "i18n/strings.toml";

            pub static SOURCE: ::echoes::TranslationSource =
                ::echoes::TranslationSource::new(&crate::TRANSLATIONS, FILE);

            pub const KEYS: &[&str] = &[
                "dialog.cancel",
                "dialog.ok",
                "nested.level1.level2.nestedstr1",
                "title",
            ];

            /// Unit for a full dotted key, or `None` when the document has no such key.
            pub fn lookup(key: &str) -> ::core::option::Option<::echoes::TranslationUnit> {
                KEYS.iter().copied().find(|k| *k == key).map(|k| ::echoes::TranslationUnit::new(&SOURCE, k))
            }

            pub fn title() -> ::echoes::TranslationUnit {
                ::echoes::TranslationUnit::new(&SOURCE, "title")
            }

            pub mod dialog {
                pub fn cancel() -> ::echoes::TranslationUnit {
                    ::echoes::TranslationUnit::new(&super::SOURCE, "dialog.cancel")
                }

                pub fn ok() -> ::echoes::TranslationUnit {
                    ::echoes::TranslationUnit::new(&super::SOURCE, "dialog.ok")
                }
            }

            pub mod nested {
                pub mod level1 {
                    pub mod level2 {
                        pub fn nestedstr1() -> ::echoes::TranslationUnit {
                            ::echoes::TranslationUnit::new(&super::super::super::SOURCE, "nested.level1.level2.nestedstr1")
                        }
                    }
                }
            }
        }
    }
}
"#;

static TRANSLATIONS: EmbeddedResources = EmbeddedResources::new(&[
    ("i18n/strings.toml", STRINGS),
    ("i18n/strings_de.toml", STRINGS_DE),
    ("i18n/strings_de-AT.toml", STRINGS_DE_AT),
]);

static SOURCE: TranslationSource = TranslationSource::new(&TRANSLATIONS, "i18n/strings.toml");

fn locale(name: &str) -> LocaleId {
    LocaleId::parse(name).unwrap()
}

#[googletest::test]
fn generates_expected_accessors() {
    let file = codegen::generate_file(
        STRINGS,
        Path::new("/work/app/i18n/strings.toml"),
        Path::new("/work/app"),
        &GeneratorOptions::default(),
    )
    .unwrap()
    .unwrap();

    expect_that!(file.file_name, eq("strings.rs"));
    expect_that!(file.source, eq(EXPECTED));
}

#[googletest::test]
fn project_generation_writes_one_file_per_family() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("i18n")).unwrap();
    fs::write(root.join("i18n/strings.toml"), STRINGS).unwrap();
    fs::write(root.join("i18n/strings_de.toml"), STRINGS_DE).unwrap();
    fs::write(root.join("i18n/strings_de-AT.toml"), STRINGS_DE_AT).unwrap();
    fs::write(root.join(".echoes.json"), r#"{"outputDir": "gen"}"#).unwrap();

    let manager = ConfigManager::load(root).unwrap();
    let documents = find_documents(manager.project_root(), manager.settings()).unwrap();
    let results =
        codegen::generate_batch(&documents, &manager.document_base(), &GeneratorOptions::from(manager.settings()));

    let generated: Vec<_> = results
        .into_iter()
        .filter_map(|result| match result.outcome {
            GenerationOutcome::Generated(file) => Some(file),
            GenerationOutcome::Skipped => None,
            GenerationOutcome::Failed(e) => panic!("{:?} failed: {e}", result.path),
        })
        .collect();
    assert_that!(generated, len(eq(1)));

    let written = codegen::write_generated(&generated[0], &manager.output_dir()).unwrap();

    expect_that!(fs::read_to_string(written).unwrap(), eq(EXPECTED));
}

#[googletest::test]
fn units_follow_locale_through_fallback_tiers() {
    let localizer = Arc::new(Localizer::new(locale("en"), FileOverrideConfig::default()));
    let title = TranslationUnit::with_localizer(&SOURCE, "title", Arc::clone(&localizer));
    let cancel = TranslationUnit::with_localizer(&SOURCE, "dialog.cancel", Arc::clone(&localizer));
    let ok = TranslationUnit::with_localizer(&SOURCE, "dialog.ok", Arc::clone(&localizer));
    let missing = TranslationUnit::with_localizer(&SOURCE, "dialog.help", Arc::clone(&localizer));

    expect_that!(title.value().unwrap(), eq("Testing Echoes"));

    localizer.set_locale(locale("de-AT"));

    expect_that!(title.value().unwrap(), eq("Echoes ausprobieren"));
    expect_that!(cancel.value().unwrap(), eq("Abbrechen"));
    expect_that!(ok.value().unwrap(), eq("Ok"));
    expect_that!(missing.value().unwrap(), eq("TRANSLATION NOT FOUND: dialog.help"));

    localizer.set_locale(locale("de"));

    expect_that!(title.value().unwrap(), eq("Echoes testen"));
}

#[googletest::test]
fn subscribed_unit_receives_updates() {
    let localizer = Arc::new(Localizer::new(locale("en"), FileOverrideConfig::default()));
    let title = TranslationUnit::with_localizer(&SOURCE, "title", Arc::clone(&localizer));
    let shown = Arc::new(Mutex::new(title.value().unwrap()));
    let _subscription = {
        let shown = Arc::clone(&shown);
        title.subscribe(move |text| *shown.lock().unwrap() = text.to_string())
    };

    localizer.set_locale(locale("de"));

    expect_that!(*shown.lock().unwrap(), eq("Echoes testen"));
}

#[googletest::test]
fn disk_overrides_win_key_by_key() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("i18n")).unwrap();
    fs::write(temp_dir.path().join("i18n/strings_de.toml"), "[translations]\ntitle = \"Vom Datenträger\"")
        .unwrap();
    let overrides = FileOverrideConfig { enabled: true, root: temp_dir.path().to_path_buf() };
    let localizer = Arc::new(Localizer::new(locale("de"), overrides));

    expect_that!(localizer.resolve_current(&SOURCE, "title").unwrap(), eq("Vom Datenträger"));
    expect_that!(localizer.resolve_current(&SOURCE, "dialog.cancel").unwrap(), eq("Abbrechen"));
}

#[googletest::test]
fn discovers_variants_and_their_locales() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("strings_sk.toml"), "").unwrap();

    let names = list_variants(&TRANSLATIONS, Some(temp_dir.path()), "strings").unwrap();
    let display: Vec<String> =
        culture_ids_of(&names, "strings").iter().map(|id| id.with_default_region().name()).collect();

    expect_that!(names, len(eq(3)));
    expect_that!(display, elements_are![eq("de-AT"), eq("de-DE"), eq("sk-SK")]);
}
