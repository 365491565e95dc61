//! Lowered type descriptor.

use crate::native::{ENUM_ZERO_VALUE, NativeType};
use indexmap::IndexMap;
use serde::Serialize;

/// Target representation chosen for a schema type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MappedType {
    /// Target type name.
    pub native_type: String,
    /// Literal for the unset value.
    pub zero_value: String,
    /// Literal for the schema default, if one was declared.
    pub default_value: Option<String>,
    /// Whether the type is a generated enumerated type.
    pub is_enumerated_value: bool,
    /// Union members by native name, in member order (unions only).
    pub union_members: Option<IndexMap<String, usize>>,
}

impl MappedType {
    /// Creates a mapping to a built-in type.
    #[must_use]
    pub fn builtin(native: NativeType, default_value: Option<String>) -> Self {
        Self {
            native_type: native.name().to_string(),
            zero_value: native.zero_value().to_string(),
            default_value,
            ..Self::default()
        }
    }

    /// Creates a mapping to a generated enumerated type.
    #[must_use]
    pub fn enumerated(native_type: impl Into<String>) -> Self {
        Self {
            native_type: native_type.into(),
            zero_value: ENUM_ZERO_VALUE.to_string(),
            is_enumerated_value: true,
            ..Self::default()
        }
    }

    /// Returns true if the native type is a built-in rather than a generated type.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        NativeType::is_builtin(&self.native_type)
    }

    /// Returns the number of union members, zero for non-union types.
    #[must_use]
    pub fn union_arity(&self) -> usize {
        self.union_members.as_ref().map_or(0, IndexMap::len)
    }
}
