//! # Modelgen Schema
//!
//! Schema type model and schema tree used by the type-lowering engine.
//!
//! This crate provides:
//! - Type definitions for the schema language's built-in and derived types
//! - An arena-backed schema tree with parent links and stable paths
//! - Leaf-reference path resolution against the tree
//! - Naming helpers deriving target identifiers from schema paths

pub mod error;
pub mod naming;
pub mod tree;
pub mod types;

pub use error::SchemaError;
pub use naming::{path_to_camel_case, to_pascal_case};
pub use tree::{ElementId, ElementKind, SchemaElement, SchemaTree};
pub use types::{EnumValue, Identity, SchemaType, TypeKind};
