//! Built-in target types.
//!
//! The fixed vocabulary of target-language types that schema primitives lower
//! to, together with their zero literals.

use modelgen_schema::TypeKind;

/// Literal used by the target representation for an absent value.
pub const ABSENT_VALUE: &str = "nil";

/// Zero literal of every enumerated type.
pub const ENUM_ZERO_VALUE: &str = "0";

/// Prefix of generated enumerated type names in emitted code.
pub const ENUM_PREFIX: &str = "E_";

/// Built-in target types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// Boolean.
    Bool,
    /// Presence marker.
    Empty,
    /// String.
    String,
    /// 64-bit floating point.
    Float64,
    /// Binary blob, kept distinct from a list of bytes.
    Binary,
    /// Untyped value requiring back-end validation.
    Any,
}

impl NativeType {
    /// Every built-in type.
    pub const ALL: [NativeType; 14] = [
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Bool,
        Self::Empty,
        Self::String,
        Self::Float64,
        Self::Binary,
        Self::Any,
    ];

    /// Returns the target-language type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Bool => "bool",
            Self::Empty => "Empty",
            Self::String => "string",
            Self::Float64 => "float64",
            Self::Binary => "Binary",
            Self::Any => "Any",
        }
    }

    /// Returns the zero literal of the type.
    #[must_use]
    pub const fn zero_value(&self) -> &'static str {
        match self {
            Self::Int8
            | Self::Int16
            | Self::Int32
            | Self::Int64
            | Self::Uint8
            | Self::Uint16
            | Self::Uint32
            | Self::Uint64 => "0",
            Self::Bool | Self::Empty => "false",
            Self::String => "\"\"",
            Self::Float64 => "0.0",
            Self::Binary | Self::Any => ABSENT_VALUE,
        }
    }

    /// Returns the integer type for an integer kind.
    #[must_use]
    pub const fn from_integer_kind(kind: TypeKind) -> Option<Self> {
        match kind {
            TypeKind::Int8 => Some(Self::Int8),
            TypeKind::Int16 => Some(Self::Int16),
            TypeKind::Int32 => Some(Self::Int32),
            TypeKind::Int64 => Some(Self::Int64),
            TypeKind::Uint8 => Some(Self::Uint8),
            TypeKind::Uint16 => Some(Self::Uint16),
            TypeKind::Uint32 => Some(Self::Uint32),
            TypeKind::Uint64 => Some(Self::Uint64),
            _ => None,
        }
    }

    /// Returns true if `name` is a built-in type name.
    #[must_use]
    pub fn is_builtin(name: &str) -> bool {
        Self::ALL.iter().any(|t| t.name() == name)
    }
}
