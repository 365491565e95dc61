//! # Modelgen Codegen
//!
//! Type lowering from schema types to target-language representations.
//!
//! This crate provides:
//! - Mapping of built-in schema types to native types and zero values
//! - Union flattening with member de-duplication
//! - Leaf-reference resolution with cycle detection
//! - Stable, collision-free names for enumerations, typedefs and identities
//! - Formatting of enumerated default values

pub mod config;
pub mod error;
pub mod formatter;
pub mod generator;
pub mod lower;
pub mod mapped;
pub mod native;
pub mod registry;
mod union;

pub use config::LoweringConfig;
pub use error::LoweringError;
pub use formatter::{enum_default_value, safe_enum_value_name};
pub use generator::{Generator, LeafFailure, LoweringReport};
pub use lower::TypeLowerer;
pub use mapped::MappedType;
pub use native::NativeType;
pub use registry::{EnumRegistry, RegistryKey, TypeRegistry};

use modelgen_schema::SchemaTree;

/// Lowers every typed element of a schema tree.
///
/// # Arguments
/// * `tree` - Schema tree to lower
/// * `config` - Naming and lowering options
///
/// # Returns
/// A report with the mapped type of each leaf and any per-leaf failures.
#[must_use]
pub fn lower_schema(tree: &SchemaTree, config: LoweringConfig) -> LoweringReport {
    let registry = EnumRegistry::new(tree);
    Generator::new(tree, &registry, config).generate()
}
