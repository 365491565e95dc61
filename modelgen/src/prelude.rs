//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```
//! use modelgen::prelude::*;
//! ```

// Schema types
pub use modelgen_schema::{
    ElementId, ElementKind, EnumValue, Identity, SchemaElement, SchemaError, SchemaTree,
    SchemaType, TypeKind,
};

// Lowering
pub use modelgen_codegen::{
    EnumRegistry, Generator, LeafFailure, LoweringConfig, LoweringError, LoweringReport,
    MappedType, NativeType, TypeLowerer, TypeRegistry, lower_schema,
};
