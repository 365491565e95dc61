//! Enumeration and identity naming registry.
//!
//! Generated enumerated types need names that are stable across a whole
//! generation run: the first lookup of a given key assigns a name, and every
//! later lookup of the same key observes it. [`TypeRegistry`] is the contract
//! the lowering engine consumes; [`EnumRegistry`] is the in-memory
//! implementation backed by a [`SchemaTree`].

use crate::config::LoweringConfig;
use crate::error::LoweringError;
use crate::formatter::safe_enum_value_name;
use crate::mapped::MappedType;
use crate::native::NativeType;
use indexmap::IndexMap;
use modelgen_schema::{
    Identity, SchemaElement, SchemaTree, SchemaType, TypeKind, path_to_camel_case, to_pascal_case,
};
use parking_lot::Mutex;
use std::collections::HashSet;

/// Lookup store for enumerated and identity-based types.
///
/// Implementations must be deterministic for identical inputs and idempotent
/// across repeated calls for the same key within one generation run.
pub trait TypeRegistry: Send + Sync {
    /// Returns the enumerated type behind a typedef, `None` if the type is not
    /// an enumerated typedef.
    ///
    /// # Errors
    /// Returns `LoweringError::InvalidEnumeratedTypedef` for malformed typedefs.
    fn lookup_typedef(
        &self,
        schema_type: &SchemaType,
        context: Option<&SchemaElement>,
        config: &LoweringConfig,
    ) -> Result<Option<MappedType>, LoweringError>;

    /// Returns the enumerated type of an inline enumeration declared at `context`.
    ///
    /// # Errors
    /// Returns `LoweringError` if no name can be assigned, including when
    /// `context` does not belong to the registry's tree.
    fn lookup_enum(
        &self,
        schema_type: &SchemaType,
        context: &SchemaElement,
        config: &LoweringConfig,
    ) -> Result<MappedType, LoweringError>;

    /// Returns the enumerated type of an identity base.
    ///
    /// # Errors
    /// Returns `LoweringError::UnknownIdentityBase` if the base is missing or unknown.
    fn lookup_identity(&self, base: Option<&Identity>) -> Result<MappedType, LoweringError>;
}

/// Key under which a generated name is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegistryKey {
    /// Enumerated typedef, by typedef name.
    Typedef(String),
    /// Enumeration shared by every leaf with the same name and values.
    SharedEnum {
        /// Leaf name.
        leaf: String,
        /// Value names in declaration order.
        values: Vec<String>,
    },
    /// Enumeration owned by a single leaf.
    LeafEnum {
        /// Schema path of the leaf.
        path: String,
        /// Value names in declaration order.
        values: Vec<String>,
    },
    /// Identity base, by qualified name.
    Identity(String),
}

#[derive(Debug, Default)]
struct RegistryState {
    assigned: IndexMap<RegistryKey, String>,
    defined: HashSet<String>,
}

/// In-memory registry assigning names from schema paths.
#[derive(Debug)]
pub struct EnumRegistry<'t> {
    tree: &'t SchemaTree,
    state: Mutex<RegistryState>,
}

impl<'t> EnumRegistry<'t> {
    /// Creates a registry for the given tree. Built-in type names are reserved.
    #[must_use]
    pub fn new(tree: &'t SchemaTree) -> Self {
        let defined = NativeType::ALL
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        Self {
            tree,
            state: Mutex::new(RegistryState {
                assigned: IndexMap::new(),
                defined,
            }),
        }
    }

    /// Returns every assignment made so far, in assignment order.
    #[must_use]
    pub fn assignments(&self) -> Vec<(RegistryKey, String)> {
        self.state
            .lock()
            .assigned
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns the number of assigned names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().assigned.len()
    }

    /// Returns true if no name has been assigned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the name recorded for `key`, assigning one derived from `seed`
    /// on first sight. Check and insert happen under one lock.
    fn assign(&self, key: RegistryKey, seed: impl FnOnce() -> String) -> String {
        let mut state = self.state.lock();
        if let Some(name) = state.assigned.get(&key) {
            return name.clone();
        }
        let name = make_name_unique(seed(), &mut state.defined);
        tracing::debug!("Assigned type name {} to {:?}", name, key);
        state.assigned.insert(key, name.clone());
        name
    }

    fn enum_seed(&self, context: &SchemaElement, config: &LoweringConfig) -> String {
        let base = if config.shorten_enum_leaf_names {
            to_pascal_case(&context.name)
        } else {
            path_to_camel_case(self.tree, context, config.compress_paths)
        };
        let in_union = context
            .schema_type
            .as_ref()
            .is_some_and(|ty| ty.kind == TypeKind::Union);
        if in_union {
            format!("{}_Enum", base)
        } else {
            base
        }
    }
}

impl TypeRegistry for EnumRegistry<'_> {
    fn lookup_typedef(
        &self,
        schema_type: &SchemaType,
        _context: Option<&SchemaElement>,
        _config: &LoweringConfig,
    ) -> Result<Option<MappedType>, LoweringError> {
        let Some(typedef_name) = schema_type.typedef_name.as_deref() else {
            return Ok(None);
        };
        if schema_type.kind != TypeKind::Enumeration {
            return Ok(None);
        }
        validate_enum_typedef(typedef_name, schema_type)?;

        let name = self.assign(RegistryKey::Typedef(typedef_name.to_string()), || {
            to_pascal_case(typedef_name)
        });
        Ok(Some(MappedType::enumerated(name)))
    }

    fn lookup_enum(
        &self,
        schema_type: &SchemaType,
        context: &SchemaElement,
        config: &LoweringConfig,
    ) -> Result<MappedType, LoweringError> {
        if !self.tree.contains(context) {
            return Err(LoweringError::ForeignContext {
                path: context.path().to_string(),
            });
        }
        let values = value_names(schema_type);
        let key = if config.skip_enum_dedup {
            RegistryKey::LeafEnum {
                path: context.path().to_string(),
                values,
            }
        } else {
            RegistryKey::SharedEnum {
                leaf: context.name.clone(),
                values,
            }
        };
        let name = self.assign(key, || self.enum_seed(context, config));
        Ok(MappedType::enumerated(name))
    }

    fn lookup_identity(&self, base: Option<&Identity>) -> Result<MappedType, LoweringError> {
        let base = base.ok_or_else(|| LoweringError::UnknownIdentityBase {
            base: "<unspecified>".to_string(),
        })?;
        let qualified = base.qualified_name();
        if !self.tree.identities().is_empty() && !self.tree.has_identity(base) {
            return Err(LoweringError::UnknownIdentityBase { base: qualified });
        }

        let name = self.assign(RegistryKey::Identity(qualified), || {
            let local = safe_enum_value_name(&base.name);
            if base.module.is_empty() {
                local
            } else {
                format!("{}_{}", to_pascal_case(&base.module), local)
            }
        });
        Ok(MappedType::enumerated(name))
    }
}

fn value_names(schema_type: &SchemaType) -> Vec<String> {
    schema_type
        .enum_values
        .iter()
        .map(|v| v.name.clone())
        .collect()
}

fn validate_enum_typedef(
    typedef_name: &str,
    schema_type: &SchemaType,
) -> Result<(), LoweringError> {
    if typedef_name.trim().is_empty() {
        return Err(LoweringError::invalid_typedef(typedef_name, "empty typedef name"));
    }
    if schema_type.enum_values.is_empty() {
        return Err(LoweringError::invalid_typedef(
            typedef_name,
            "enumeration declares no values",
        ));
    }
    let mut seen = HashSet::new();
    for value in &schema_type.enum_values {
        if !seen.insert(value.name.as_str()) {
            return Err(LoweringError::invalid_typedef(
                typedef_name,
                format!("duplicate value '{}'", value.name),
            ));
        }
    }
    Ok(())
}

/// Appends `_` until `name` is unused, then records it.
fn make_name_unique(mut name: String, defined: &mut HashSet<String>) -> String {
    while defined.contains(&name) {
        name.push('_');
    }
    defined.insert(name.clone());
    name
}
