//! Default-value formatting for enumerated types.

/// Formats a schema default as a literal of a generated enumerated type.
///
/// A `module:` qualifier on the raw default is dropped, `prefix` is removed
/// from the native name when present, and the value is sanitised into an
/// identifier, giving `<Base>_<Value>`.
#[must_use]
pub fn enum_default_value(native_type: &str, raw_default: &str, prefix: &str) -> String {
    let value = raw_default
        .split_once(':')
        .map_or(raw_default, |(_, local)| local);
    let base = if prefix.is_empty() {
        native_type
    } else {
        native_type.strip_prefix(prefix).unwrap_or(native_type)
    };
    format!("{}_{}", base, safe_enum_value_name(value))
}

/// Replaces every character that cannot appear in an identifier with `_`.
#[must_use]
pub fn safe_enum_value_name(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
