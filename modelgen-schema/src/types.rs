//! Schema type definitions.
//!
//! This module contains the data structures representing the schema
//! language's own type system: built-in kinds, typedef-derived types, unions,
//! enumerations, identity references and leaf references.

use std::fmt;

/// Built-in type kinds of the schema language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
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
    /// Presence marker without a value.
    Empty,
    /// Character string.
    String,
    /// One of several member types.
    Union,
    /// Named set of values.
    Enumeration,
    /// Reference to an identity derived from a base identity.
    IdentityRef,
    /// Reference to the value of another leaf.
    LeafRef,
    /// Fixed-point decimal.
    Decimal64,
    /// Opaque binary data.
    Binary,
    /// Set of named bits.
    Bits,
    /// Path to a data node instance.
    InstanceIdentifier,
    /// Any kind the schema loader could not classify.
    Unknown,
}

impl TypeKind {
    /// Returns the schema language keyword for this kind.
    #[must_use]
    pub const fn schema_name(&self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Bool => "boolean",
            Self::Empty => "empty",
            Self::String => "string",
            Self::Union => "union",
            Self::Enumeration => "enumeration",
            Self::IdentityRef => "identityref",
            Self::LeafRef => "leafref",
            Self::Decimal64 => "decimal64",
            Self::Binary => "binary",
            Self::Bits => "bits",
            Self::InstanceIdentifier => "instance-identifier",
            Self::Unknown => "unknown",
        }
    }

    /// Parses a kind from its schema language keyword.
    #[must_use]
    pub fn from_schema_name(name: &str) -> Option<Self> {
        match name {
            "int8" => Some(Self::Int8),
            "int16" => Some(Self::Int16),
            "int32" => Some(Self::Int32),
            "int64" => Some(Self::Int64),
            "uint8" => Some(Self::Uint8),
            "uint16" => Some(Self::Uint16),
            "uint32" => Some(Self::Uint32),
            "uint64" => Some(Self::Uint64),
            "boolean" => Some(Self::Bool),
            "empty" => Some(Self::Empty),
            "string" => Some(Self::String),
            "union" => Some(Self::Union),
            "enumeration" => Some(Self::Enumeration),
            "identityref" => Some(Self::IdentityRef),
            "leafref" => Some(Self::LeafRef),
            "decimal64" => Some(Self::Decimal64),
            "binary" => Some(Self::Binary),
            "bits" => Some(Self::Bits),
            "instance-identifier" => Some(Self::InstanceIdentifier),
            _ => None,
        }
    }

    /// Returns true if this is a signed integer kind.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    /// Returns true if this is an unsigned integer kind.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64
        )
    }

    /// Returns true if this is any integer kind.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        self.is_signed() || self.is_unsigned()
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema_name())
    }
}

/// Identity declared in a schema module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    /// Declaring module.
    pub module: String,
    /// Identity name.
    pub name: String,
}

impl Identity {
    /// Creates a new identity.
    #[must_use]
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// Returns the `module:name` form of the identity.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.module, self.name)
    }
}

/// Enumeration value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    /// Value name.
    pub name: String,
    /// Assigned integer value.
    pub value: i64,
}

impl EnumValue {
    /// Creates a new enum value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A node of the schema's type system.
///
/// When a type is declared through a typedef, `typedef_name` carries the
/// typedef's name and `kind` its resolved built-in kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaType {
    /// Resolved built-in kind.
    pub kind: TypeKind,
    /// Typedef the type was declared through, if any.
    pub typedef_name: Option<String>,
    /// Member types (unions only).
    pub members: Vec<SchemaType>,
    /// Path expression (leaf references only).
    pub reference_path: Option<String>,
    /// Base identity (identity references only).
    pub identity_base: Option<Identity>,
    /// Declared values (enumerations only).
    pub enum_values: Vec<EnumValue>,
    /// Literal from the schema's default statement.
    pub raw_default: Option<String>,
}

impl SchemaType {
    /// Creates a type of the given kind with no attributes.
    #[must_use]
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            typedef_name: None,
            members: Vec::new(),
            reference_path: None,
            identity_base: None,
            enum_values: Vec::new(),
            raw_default: None,
        }
    }

    /// Creates a union of the given member types.
    #[must_use]
    pub fn union(members: Vec<SchemaType>) -> Self {
        Self {
            members,
            ..Self::new(TypeKind::Union)
        }
    }

    /// Creates an enumeration with values numbered in declaration order.
    #[must_use]
    pub fn enumeration<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let enum_values = names
            .into_iter()
            .zip(0..)
            .map(|(name, value)| EnumValue::new(name, value))
            .collect();
        Self {
            enum_values,
            ..Self::new(TypeKind::Enumeration)
        }
    }

    /// Creates an identity reference to the given base.
    #[must_use]
    pub fn identityref(base: Identity) -> Self {
        Self {
            identity_base: Some(base),
            ..Self::new(TypeKind::IdentityRef)
        }
    }

    /// Creates a leaf reference with the given path expression.
    #[must_use]
    pub fn leafref(path: impl Into<String>) -> Self {
        Self {
            reference_path: Some(path.into()),
            ..Self::new(TypeKind::LeafRef)
        }
    }

    /// Sets the raw default literal.
    #[must_use]
    pub fn with_default(mut self, raw_default: impl Into<String>) -> Self {
        self.raw_default = Some(raw_default.into());
        self
    }

    /// Marks the type as declared through the named typedef.
    #[must_use]
    pub fn with_typedef(mut self, name: impl Into<String>) -> Self {
        self.typedef_name = Some(name.into());
        self
    }

    /// Returns true if the type was declared through a typedef.
    #[must_use]
    pub fn is_typedef(&self) -> bool {
        self.typedef_name.is_some()
    }

    /// Returns the declared name: the typedef name or the built-in keyword.
    #[must_use]
    pub fn name(&self) -> &str {
        self.typedef_name
            .as_deref()
            .unwrap_or_else(|| self.kind.schema_name())
    }
}
