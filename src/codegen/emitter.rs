//! Rust source emission for one document.
//!
//! The generated tree mirrors the translation tree: one module per group and
//! one zero-argument function per entry, each returning a
//! `TranslationUnit` bound to the document and the entry's full path.
//! Entries come first in lexicographic order, then subgroups, so identical
//! descriptors always produce identical bytes.

use std::collections::HashMap;
use std::fmt::Write;

use crate::codegen::descriptor::DocumentDescriptor;
use crate::codegen::ident::to_identifier;
use crate::codegen::{
    CodegenError,
    GeneratorOptions,
};
use crate::ir::tree::{
    KEY_SEPARATOR,
    TranslationGroup,
};

/// Items every generated class scope declares. Root entries may not use these names.
pub const RESERVED_ROOT_ITEMS: &[&str] = &["FILE", "SOURCE", "KEYS", "lookup"];

const INDENT: &str = "    ";

/// Generates the Rust source for `descriptor`.
///
/// # Errors
/// Returns [`CodegenError::IdentifierCollision`] when two names of one scope
/// map to the same identifier, or a root entry shadows a reserved item.
pub fn emit(descriptor: &DocumentDescriptor, options: &GeneratorOptions) -> Result<String, CodegenError> {
    let runtime = options.runtime_path();
    let mut writer = SourceWriter::default();

    writer.line(&format!("// @generated by echoes-gen from {}. Do not edit.", descriptor.relative_path))?;

    let namespace: Vec<String> = namespace_segments(&descriptor.namespace).map(to_identifier).collect();
    let class_name = to_identifier(&descriptor.class_name);

    writer.item_break();
    writer.line("#[allow(non_snake_case, dead_code)]")?;
    for segment in &namespace {
        writer.open(&format!("pub mod {segment}"))?;
    }
    writer.open(&format!("pub mod {class_name}"))?;

    emit_class_header(&mut writer, descriptor, options, &runtime)?;
    emit_group(&mut writer, &descriptor.root_group, &descriptor.class_name, 0, &runtime)?;

    for _ in 0..=namespace.len() {
        writer.close()?;
    }
    Ok(writer.finish())
}

fn namespace_segments(namespace: &str) -> impl Iterator<Item = &str> {
    namespace.split("::").flat_map(|part| part.split('.')).filter(|segment| !segment.is_empty())
}

fn emit_class_header(
    writer: &mut SourceWriter,
    descriptor: &DocumentDescriptor,
    options: &GeneratorOptions,
    runtime: &str,
) -> Result<(), CodegenError> {
    writer.item_break();
    writer.line(&format!("pub const FILE: &str = {:?};", descriptor.relative_path))?;
    writer.item_break();
    writer.line(&format!("pub static SOURCE: {runtime}::TranslationSource ="))?;
    writer.line(&format!(
        "{INDENT}{runtime}::TranslationSource::new(&{}, FILE);",
        options.resources_path
    ))?;

    let mut keys: Vec<&str> =
        descriptor.root_group.all_entries().into_iter().map(|entry| entry.full_path.as_str()).collect();
    keys.sort_unstable();

    writer.item_break();
    if keys.is_empty() {
        writer.line("pub const KEYS: &[&str] = &[];")?;
    } else {
        writer.line("pub const KEYS: &[&str] = &[")?;
        for key in keys {
            writer.line(&format!("{INDENT}{key:?},"))?;
        }
        writer.line("];")?;
    }

    writer.item_break();
    writer.line("/// Unit for a full dotted key, or `None` when the document has no such key.")?;
    writer.open(&format!("pub fn lookup(key: &str) -> ::core::option::Option<{runtime}::TranslationUnit>"))?;
    writer.line(&format!(
        "KEYS.iter().copied().find(|k| *k == key).map(|k| {runtime}::TranslationUnit::new(&SOURCE, k))"
    ))?;
    writer.close()?;
    Ok(())
}

fn emit_group(
    writer: &mut SourceWriter,
    group: &TranslationGroup,
    scope: &str,
    depth: usize,
    runtime: &str,
) -> Result<(), CodegenError> {
    let entry_idents = check_identifiers(group, scope, depth == 0)?;
    let source_path = format!("{}SOURCE", "super::".repeat(depth));

    for (entry, ident) in group.entries.values().zip(&entry_idents) {
        writer.item_break();
        writer.open(&format!("pub fn {ident}() -> {runtime}::TranslationUnit"))?;
        writer.line(&format!("{runtime}::TranslationUnit::new(&{source_path}, {:?})", entry.full_path))?;
        writer.close()?;
    }

    for (name, sub_group) in &group.sub_groups {
        let sub_scope = if depth == 0 { name.clone() } else { format!("{scope}{KEY_SEPARATOR}{name}") };
        writer.item_break();
        writer.open(&format!("pub mod {}", to_identifier(name)))?;
        emit_group(writer, sub_group, &sub_scope, depth + 1, runtime)?;
        writer.close()?;
    }
    Ok(())
}

/// Returns the entry identifiers in emission order after checking the scope for collisions.
fn check_identifiers(
    group: &TranslationGroup,
    scope: &str,
    is_root: bool,
) -> Result<Vec<String>, CodegenError> {
    let mut taken: HashMap<String, String> = HashMap::new();
    let mut entry_idents = Vec::with_capacity(group.entries.len());

    for name in group.entries.keys() {
        let ident = to_identifier(name);
        if is_root && let Some(reserved) = RESERVED_ROOT_ITEMS.iter().find(|r| **r == ident) {
            return Err(CodegenError::IdentifierCollision {
                scope: scope.to_string(),
                identifier: ident,
                first: (*reserved).to_string(),
                second: name.clone(),
            });
        }
        claim(&mut taken, scope, &ident, name)?;
        entry_idents.push(ident);
    }
    for name in group.sub_groups.keys() {
        claim(&mut taken, scope, &to_identifier(name), name)?;
    }
    Ok(entry_idents)
}

fn claim(
    taken: &mut HashMap<String, String>,
    scope: &str,
    ident: &str,
    name: &str,
) -> Result<(), CodegenError> {
    if let Some(first) = taken.insert(ident.to_string(), name.to_string()) {
        return Err(CodegenError::IdentifierCollision {
            scope: scope.to_string(),
            identifier: ident.to_string(),
            first,
            second: name.to_string(),
        });
    }
    Ok(())
}

/// Indentation-aware line writer. Items inside one scope are separated by a blank line.
#[derive(Debug, Default)]
struct SourceWriter {
    out: String,
    depth: usize,
    at_scope_start: bool,
}

impl SourceWriter {
    fn item_break(&mut self) {
        if !self.at_scope_start && !self.out.is_empty() {
            self.out.push('\n');
        }
        self.at_scope_start = false;
    }

    fn line(&mut self, text: &str) -> std::fmt::Result {
        writeln!(self.out, "{}{text}", INDENT.repeat(self.depth))
    }

    fn open(&mut self, header: &str) -> std::fmt::Result {
        self.line(&format!("{header} {{"))?;
        self.depth += 1;
        self.at_scope_start = true;
        Ok(())
    }

    fn close(&mut self) -> std::fmt::Result {
        self.depth = self.depth.saturating_sub(1);
        self.at_scope_start = false;
        self.line("}")
    }

    fn finish(self) -> String {
        self.out
    }
}
