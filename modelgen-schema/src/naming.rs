//! Naming helpers.
//!
//! Derives target-language identifiers from schema identifiers and schema
//! paths. Names are not checked for uniqueness here.

use crate::tree::{ElementKind, SchemaElement, SchemaTree};

/// Converts a schema identifier to PascalCase.
///
/// `-`, `_` and `.` act as word separators.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' || c == '.' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Builds the name of an element from its path, in the form
/// `Outer_Inner_Element`.
///
/// Choice and case nodes never contribute a segment. With `compress` set,
/// `config`/`state` containers and containers that only wrap a list are
/// dropped as well.
#[must_use]
pub fn path_to_camel_case(tree: &SchemaTree, element: &SchemaElement, compress: bool) -> String {
    tree.ancestry(element)
        .into_iter()
        .filter(|e| contributes_segment(tree, e, compress))
        .map(|e| to_pascal_case(&e.name))
        .collect::<Vec<_>>()
        .join("_")
}

/// Returns true if the element appears in a generated path name.
fn contributes_segment(tree: &SchemaTree, element: &SchemaElement, compress: bool) -> bool {
    if element.kind.is_choice_or_case() {
        return false;
    }
    if !compress || element.kind != ElementKind::Container {
        return true;
    }
    if element.name == "config" || element.name == "state" {
        return false;
    }
    let mut children = tree.children(element);
    !matches!(
        (children.next(), children.next()),
        (Some(only), None) if only.kind == ElementKind::List
    )
}
