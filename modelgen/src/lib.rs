//! # Modelgen
//!
//! Schema type lowering for model code generators.
//!
//! Modelgen takes the types declared on the leaves of a data-modeling schema
//! and decides how each one is represented in generated code: the native
//! type name, its zero value, the literal for a declared default, and the
//! member layout of unions.
//!
//! ## Features
//!
//! - **Built-in mapping** - Integers, strings, booleans, decimals and binary
//! - **Union flattening** - Nested unions collapse into one de-duplicated member list
//! - **Reference resolution** - Leaf references resolve to their target's type
//! - **Stable naming** - Enumerations, typedefs and identities get unique names
//!
//! ## Quick Start
//!
//! ```
//! use modelgen::prelude::*;
//!
//! let mut tree = SchemaTree::new();
//! let iface = tree.add_container(None, "if").unwrap();
//! tree.add_leaf(
//!     Some(iface),
//!     "mode",
//!     SchemaType::enumeration(["UP", "DOWN"]).with_default("UP"),
//! )
//! .unwrap();
//!
//! let report = lower_schema(&tree, LoweringConfig::default());
//! let mode = report.get("/if/mode").unwrap();
//! assert_eq!(mode.native_type, "If_Mode");
//! assert_eq!(mode.default_value.as_deref(), Some("If_Mode_UP"));
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Schema types, the schema tree and path naming
//! - [`codegen`] - Type lowering, naming registry and default formatting

pub mod prelude;

/// Schema types, the schema tree and path naming.
pub mod schema {
    pub use modelgen_schema::*;
}

/// Type lowering from schema types to native representations.
pub mod codegen {
    pub use modelgen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use modelgen_codegen::{
    LoweringConfig, LoweringError, LoweringReport, MappedType, TypeLowerer, lower_schema,
};
pub use modelgen_schema::{SchemaTree, SchemaType, TypeKind};
