//! Mapping of translation names to Rust identifiers.

/// Keywords usable as raw identifiers (`r#type`).
const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn",
    "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

/// Names that cannot be raw identifiers.
const NON_RAW_NAMES: &[&str] = &["crate", "self", "Self", "super", "_"];

/// Maps a translation segment name to a valid Rust identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_` and a leading digit gets a `_`
/// prefix. Keywords become raw identifiers, except the few that cannot be raw,
/// which get a trailing `_`.
#[must_use]
pub fn to_identifier(name: &str) -> String {
    let mut ident: String =
        name.chars().map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' }).collect();

    if ident.is_empty() {
        ident.push('_');
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    if NON_RAW_NAMES.contains(&ident.as_str()) {
        ident.push('_');
        ident
    } else if RAW_KEYWORDS.contains(&ident.as_str()) {
        format!("r#{ident}")
    } else {
        ident
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::plain("title", "title")]
    #[case::pascal_case("Strings", "Strings")]
    #[case::dash("save-as", "save_as")]
    #[case::space("two words", "two_words")]
    #[case::non_ascii("größe", "gr__e")]
    #[case::leading_digit("404", "_404")]
    #[case::keyword("type", "r#type")]
    #[case::reserved_keyword("gen", "r#gen")]
    #[case::self_lower("self", "self_")]
    #[case::self_upper("Self", "Self_")]
    #[case::crate_kw("crate", "crate_")]
    #[case::underscore("_", "__")]
    #[case::empty("", "__")]
    fn maps_names(#[case] name: &str, #[case] expected: &str) {
        assert_that!(to_identifier(name), eq(expected));
    }
}
