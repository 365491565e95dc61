//! Type lowering dispatcher.
//!
//! Maps one schema type to one [`MappedType`]. Typedef and leaf-reference
//! indirections and union members are followed recursively; enumeration and
//! identity names come from the [`TypeRegistry`].

use crate::config::LoweringConfig;
use crate::error::LoweringError;
use crate::formatter::enum_default_value;
use crate::mapped::MappedType;
use crate::native::{ENUM_PREFIX, ENUM_ZERO_VALUE, NativeType};
use crate::registry::TypeRegistry;
use crate::union::UnionFlattener;
use modelgen_schema::{SchemaElement, SchemaError, SchemaTree, SchemaType, TypeKind};

/// Lowers schema types into target representations.
pub struct TypeLowerer<'a> {
    tree: &'a SchemaTree,
    registry: &'a dyn TypeRegistry,
    config: LoweringConfig,
}

impl<'a> TypeLowerer<'a> {
    /// Creates a lowerer over the given tree and registry.
    #[must_use]
    pub fn new(
        tree: &'a SchemaTree,
        registry: &'a dyn TypeRegistry,
        config: LoweringConfig,
    ) -> Self {
        Self {
            tree,
            registry,
            config,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &LoweringConfig {
        &self.config
    }

    /// Returns the schema tree used for reference resolution and naming.
    #[must_use]
    pub const fn tree(&self) -> &'a SchemaTree {
        self.tree
    }

    /// Returns the registry used for enumerated names.
    #[must_use]
    pub fn registry(&self) -> &'a dyn TypeRegistry {
        self.registry
    }

    /// Maps `schema_type`, declared at `context`, to its target representation.
    ///
    /// # Errors
    /// Returns `LoweringError` if the type cannot be mapped. Union members are
    /// all attempted before an aggregate error is returned. A context element
    /// from another tree is rejected with `LoweringError::ForeignContext`.
    pub fn resolve(
        &self,
        schema_type: &SchemaType,
        context: Option<&SchemaElement>,
    ) -> Result<MappedType, LoweringError> {
        if let Some(ctx) = context.filter(|ctx| !self.tree.contains(ctx)) {
            return Err(LoweringError::ForeignContext {
                path: ctx.path().to_string(),
            });
        }
        let mut chain = ReferenceChain::default();
        self.resolve_with(schema_type, context, &mut chain)
    }

    /// Maps the declared type of a leaf, using the leaf as context.
    ///
    /// Returns `None` for elements without a type.
    pub fn resolve_leaf(&self, leaf: &SchemaElement) -> Option<Result<MappedType, LoweringError>> {
        leaf.schema_type
            .as_ref()
            .map(|ty| self.resolve(ty, Some(leaf)))
    }

    pub(crate) fn resolve_with(
        &self,
        schema_type: &SchemaType,
        context: Option<&SchemaElement>,
        chain: &mut ReferenceChain,
    ) -> Result<MappedType, LoweringError> {
        tracing::trace!(
            "Lowering {} at {}",
            schema_type.name(),
            context.map_or("<none>", SchemaElement::path)
        );

        if let Some(mut mapped) = self
            .registry
            .lookup_typedef(schema_type, context, &self.config)?
        {
            mapped.zero_value = ENUM_ZERO_VALUE.to_string();
            if let Some(raw) = &schema_type.raw_default {
                mapped.default_value =
                    Some(enum_default_value(&mapped.native_type, raw, ENUM_PREFIX));
            }
            return Ok(mapped);
        }

        let default = schema_type.raw_default.clone();
        let mapped = match schema_type.kind {
            kind if kind.is_integer() => {
                let native = NativeType::from_integer_kind(kind).unwrap_or(NativeType::Any);
                MappedType::builtin(native, default)
            }
            TypeKind::Bool => MappedType::builtin(NativeType::Bool, default),
            TypeKind::Empty => MappedType::builtin(NativeType::Empty, None),
            TypeKind::String => MappedType::builtin(NativeType::String, default),
            TypeKind::Union => {
                return UnionFlattener::new(self).flatten(schema_type, context, chain);
            }
            TypeKind::Enumeration => {
                let context = context.ok_or(LoweringError::MissingContext {
                    kind: TypeKind::Enumeration,
                })?;
                let mapped = self.registry.lookup_enum(schema_type, context, &self.config)?;
                with_enum_default(mapped, schema_type.raw_default.as_deref())
            }
            TypeKind::IdentityRef => {
                if context.is_none() {
                    return Err(LoweringError::MissingContext {
                        kind: TypeKind::IdentityRef,
                    });
                }
                let mapped = self
                    .registry
                    .lookup_identity(schema_type.identity_base.as_ref())?;
                with_enum_default(mapped, schema_type.raw_default.as_deref())
            }
            TypeKind::Decimal64 => MappedType::builtin(NativeType::Float64, default),
            TypeKind::LeafRef => return self.resolve_reference(schema_type, context, chain),
            TypeKind::Binary => MappedType::builtin(NativeType::Binary, default),
            other => {
                tracing::debug!(
                    "No concrete mapping for {} at {}, falling back to {}",
                    other,
                    context.map_or("<none>", SchemaElement::path),
                    NativeType::Any.name()
                );
                MappedType::builtin(NativeType::Any, None)
            }
        };
        Ok(mapped)
    }

    /// Follows a leaf reference to its target and lowers the target's type.
    fn resolve_reference(
        &self,
        schema_type: &SchemaType,
        context: Option<&SchemaElement>,
        chain: &mut ReferenceChain,
    ) -> Result<MappedType, LoweringError> {
        let path = schema_type.reference_path.as_deref().ok_or_else(|| {
            LoweringError::unresolvable(
                "",
                SchemaError::invalid_path("", "leaf reference declares no path"),
            )
        })?;
        let target = self
            .tree
            .resolve_reference(path, context)
            .map_err(|source| LoweringError::unresolvable(path, source))?;
        let target_type = target.schema_type.as_ref().ok_or_else(|| {
            LoweringError::unresolvable(
                path,
                SchemaError::NotALeaf {
                    path: path.to_string(),
                },
            )
        })?;

        chain.enter(context, target)?;
        let result = self.resolve_with(target_type, Some(target), chain);
        chain.leave();
        result
    }
}

/// Sets the zero value, the formatted default and the enumerated flag of a
/// registry result.
pub(crate) fn with_enum_default(mut mapped: MappedType, raw_default: Option<&str>) -> MappedType {
    mapped.zero_value = ENUM_ZERO_VALUE.to_string();
    mapped.default_value =
        raw_default.map(|raw| enum_default_value(&mapped.native_type, raw, ENUM_PREFIX));
    mapped.is_enumerated_value = true;
    mapped
}

/// Element paths currently being followed through leaf references.
#[derive(Debug, Default)]
pub(crate) struct ReferenceChain {
    paths: Vec<String>,
    /// Number of pushes made by each `enter`, for `leave`.
    frames: Vec<usize>,
}

impl ReferenceChain {
    /// Records a hop from `from` to `to`.
    ///
    /// # Errors
    /// Returns `LoweringError::CyclicReference` if `to` is already on the chain.
    fn enter(
        &mut self,
        from: Option<&SchemaElement>,
        to: &SchemaElement,
    ) -> Result<(), LoweringError> {
        let mut pushed = 0;
        if let Some(from) = from {
            if self.paths.last().map(String::as_str) != Some(from.path()) {
                self.paths.push(from.path().to_string());
                pushed += 1;
            }
        }
        if self.paths.iter().any(|p| p == to.path()) {
            let mut chain = self.paths.clone();
            chain.push(to.path().to_string());
            self.paths.truncate(self.paths.len() - pushed);
            return Err(LoweringError::CyclicReference { chain });
        }
        self.paths.push(to.path().to_string());
        self.frames.push(pushed + 1);
        Ok(())
    }

    fn leave(&mut self) {
        if let Some(pushed) = self.frames.pop() {
            self.paths.truncate(self.paths.len().saturating_sub(pushed));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::ABSENT_VALUE;
    use crate::registry::EnumRegistry;
    use modelgen_schema::Identity;

    fn lower(
        tree: &SchemaTree,
        config: LoweringConfig,
        path: &str,
    ) -> Result<MappedType, LoweringError> {
        let registry = EnumRegistry::new(tree);
        let lowerer = TypeLowerer::new(tree, &registry, config);
        let leaf = tree.find(path).expect("leaf exists");
        lowerer.resolve_leaf(leaf).expect("typed leaf")
    }

    fn standalone(schema_type: SchemaType) -> Result<MappedType, LoweringError> {
        let tree = SchemaTree::new();
        let registry = EnumRegistry::new(&tree);
        TypeLowerer::new(&tree, &registry, LoweringConfig::default()).resolve(&schema_type, None)
    }

    #[test]
    fn test_integer_kinds() {
        let cases = [
            (TypeKind::Int8, "int8"),
            (TypeKind::Int16, "int16"),
            (TypeKind::Int32, "int32"),
            (TypeKind::Int64, "int64"),
            (TypeKind::Uint8, "uint8"),
            (TypeKind::Uint16, "uint16"),
            (TypeKind::Uint32, "uint32"),
            (TypeKind::Uint64, "uint64"),
        ];
        for (kind, name) in cases {
            let mapped = standalone(SchemaType::new(kind).with_default("42")).expect("integer");
            assert_eq!(mapped.native_type, name);
            assert_eq!(mapped.zero_value, "0");
            assert_eq!(mapped.default_value.as_deref(), Some("42"));
            assert!(!mapped.is_enumerated_value);
            assert!(mapped.union_members.is_none());
        }
    }

    #[test]
    fn test_primitives_are_pure() {
        let ty = SchemaType::new(TypeKind::Bool).with_default("true");
        let first = standalone(ty.clone()).expect("bool");
        let second = standalone(ty).expect("bool");
        assert_eq!(first, second);
        assert_eq!(first.native_type, "bool");
        assert_eq!(first.zero_value, "false");
        assert_eq!(first.default_value.as_deref(), Some("true"));
    }

    #[test]
    fn test_empty_never_carries_default() {
        let mapped = standalone(SchemaType::new(TypeKind::Empty).with_default("ignored"))
            .expect("empty");
        assert_eq!(mapped.native_type, "Empty");
        assert_eq!(mapped.zero_value, "false");
        assert_eq!(mapped.default_value, None);
    }

    #[test]
    fn test_string_decimal_binary() {
        let string = standalone(SchemaType::new(TypeKind::String).with_default("eth0"))
            .expect("string");
        assert_eq!(string.native_type, "string");
        assert_eq!(string.zero_value, "\"\"");
        assert_eq!(string.default_value.as_deref(), Some("eth0"));

        let decimal = standalone(SchemaType::new(TypeKind::Decimal64).with_default("2.5"))
            .expect("decimal");
        assert_eq!(decimal.native_type, "float64");
        assert_eq!(decimal.zero_value, "0.0");
        assert_eq!(decimal.default_value.as_deref(), Some("2.5"));

        let binary = standalone(SchemaType::new(TypeKind::Binary)).expect("binary");
        assert_eq!(binary.native_type, "Binary");
        assert_eq!(binary.zero_value, ABSENT_VALUE);
    }

    #[test]
    fn test_unsupported_kinds_fall_back_to_any() {
        for kind in [TypeKind::Bits, TypeKind::InstanceIdentifier, TypeKind::Unknown] {
            let mapped = standalone(SchemaType::new(kind).with_default("x")).expect("fallback");
            assert_eq!(mapped.native_type, "Any");
            assert_eq!(mapped.zero_value, ABSENT_VALUE);
            assert_eq!(mapped.default_value, None);
        }
    }

    #[test]
    fn test_enum_and_identity_require_context() {
        assert_eq!(
            standalone(SchemaType::enumeration(["A"])),
            Err(LoweringError::MissingContext {
                kind: TypeKind::Enumeration
            })
        );
        assert_eq!(
            standalone(SchemaType::identityref(Identity::new("m", "BASE"))),
            Err(LoweringError::MissingContext {
                kind: TypeKind::IdentityRef
            })
        );
    }

    #[test]
    fn test_context_from_another_tree_is_rejected() {
        let mut other = SchemaTree::new();
        let mut parent = None;
        for name in ["a", "b", "c", "d", "e"] {
            parent = Some(other.add_container(parent, name).unwrap());
        }
        let union_leaf = other
            .add_leaf(
                parent,
                "u",
                SchemaType::union(vec![
                    SchemaType::new(TypeKind::Int8),
                    SchemaType::new(TypeKind::String),
                ]),
            )
            .unwrap();
        let enum_leaf = other
            .add_leaf(parent, "mode", SchemaType::enumeration(["UP", "DOWN"]))
            .unwrap();

        let empty = SchemaTree::new();
        let registry = EnumRegistry::new(&empty);
        let lowerer = TypeLowerer::new(&empty, &registry, LoweringConfig::default());

        assert_eq!(
            lowerer.resolve_leaf(other.get(union_leaf)),
            Some(Err(LoweringError::ForeignContext {
                path: "/a/b/c/d/e/u".to_string()
            }))
        );
        assert_eq!(
            lowerer.resolve_leaf(other.get(enum_leaf)),
            Some(Err(LoweringError::ForeignContext {
                path: "/a/b/c/d/e/mode".to_string()
            }))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_over_another_tree_is_rejected() {
        let mut tree = SchemaTree::new();
        let iface = tree.add_container(None, "if").unwrap();
        let mode = tree
            .add_leaf(Some(iface), "mode", SchemaType::enumeration(["UP"]))
            .unwrap();

        let empty = SchemaTree::new();
        let registry = EnumRegistry::new(&empty);
        let lowerer = TypeLowerer::new(&tree, &registry, LoweringConfig::default());

        assert!(matches!(
            lowerer.resolve_leaf(tree.get(mode)),
            Some(Err(LoweringError::ForeignContext { .. }))
        ));
    }

    #[test]
    fn test_enum_leaf_end_to_end() {
        let mut tree = SchemaTree::new();
        let ifc = tree.add_container(None, "if").unwrap();
        tree.add_leaf(
            Some(ifc),
            "mode",
            SchemaType::enumeration(["UP", "DOWN"]).with_default("UP"),
        )
        .unwrap();

        let mapped = lower(&tree, LoweringConfig::default(), "/if/mode").expect("enum");
        assert_eq!(mapped.native_type, "If_Mode");
        assert_eq!(mapped.zero_value, "0");
        assert_eq!(mapped.default_value.as_deref(), Some("If_Mode_UP"));
        assert!(mapped.is_enumerated_value);
    }

    #[test]
    fn test_enum_resolution_is_stable() {
        let mut tree = SchemaTree::new();
        let ifc = tree.add_container(None, "if").unwrap();
        let mode = tree
            .add_leaf(Some(ifc), "mode", SchemaType::enumeration(["UP", "DOWN"]))
            .unwrap();
        let other = tree
            .add_leaf(Some(ifc), "other", SchemaType::enumeration(["X"]))
            .unwrap();

        let registry = EnumRegistry::new(&tree);
        let lowerer = TypeLowerer::new(&tree, &registry, LoweringConfig::default());
        let first = lowerer.resolve_leaf(tree.get(mode)).unwrap().unwrap();
        lowerer.resolve_leaf(tree.get(other)).unwrap().unwrap();
        let second = lowerer.resolve_leaf(tree.get(mode)).unwrap().unwrap();
        assert_eq!(first.native_type, second.native_type);
    }

    #[test]
    fn test_typedef_enumeration() {
        let mut tree = SchemaTree::new();
        tree.add_leaf(
            None,
            "duplex",
            SchemaType::enumeration(["FULL", "HALF"])
                .with_typedef("duplex-mode")
                .with_default("FULL"),
        )
        .unwrap();

        let mapped = lower(&tree, LoweringConfig::default(), "/duplex").expect("typedef");
        assert_eq!(mapped.native_type, "DuplexMode");
        assert_eq!(mapped.zero_value, "0");
        assert_eq!(mapped.default_value.as_deref(), Some("DuplexMode_FULL"));
        assert!(mapped.is_enumerated_value);
    }

    #[test]
    fn test_malformed_typedef_is_surfaced() {
        let err = standalone(SchemaType::new(TypeKind::Enumeration).with_typedef("broken"))
            .unwrap_err();
        assert!(matches!(err, LoweringError::InvalidEnumeratedTypedef { .. }));
    }

    #[test]
    fn test_identityref_leaf() {
        let mut tree = SchemaTree::new();
        let base = Identity::new("oc-types", "ADDRESS_FAMILY");
        tree.add_identity(base.clone());
        tree.add_leaf(
            None,
            "afi",
            SchemaType::identityref(base).with_default("oc-types:IPV4"),
        )
        .unwrap();

        let mapped = lower(&tree, LoweringConfig::default(), "/afi").expect("identityref");
        assert_eq!(mapped.native_type, "OcTypes_ADDRESS_FAMILY");
        assert_eq!(mapped.zero_value, "0");
        assert_eq!(
            mapped.default_value.as_deref(),
            Some("OcTypes_ADDRESS_FAMILY_IPV4")
        );
        assert!(mapped.is_enumerated_value);
    }

    #[test]
    fn test_identityref_unknown_base() {
        let mut tree = SchemaTree::new();
        tree.add_identity(Identity::new("oc-types", "ADDRESS_FAMILY"));
        tree.add_leaf(
            None,
            "afi",
            SchemaType::identityref(Identity::new("oc-types", "NOPE")),
        )
        .unwrap();

        let err = lower(&tree, LoweringConfig::default(), "/afi").unwrap_err();
        assert!(matches!(err, LoweringError::UnknownIdentityBase { .. }));
    }

    #[test]
    fn test_leafref_is_transparent() {
        let mut tree = SchemaTree::new();
        let a = tree.add_container(None, "a").unwrap();
        tree.add_leaf(
            Some(a),
            "mtu",
            SchemaType::new(TypeKind::Uint16).with_default("1500"),
        )
        .unwrap();
        tree.add_leaf(
            Some(a),
            "mtu-ref",
            SchemaType::leafref("../mtu").with_default("9000"),
        )
        .unwrap();

        let direct = lower(&tree, LoweringConfig::default(), "/a/mtu").expect("direct");
        let via_ref = lower(&tree, LoweringConfig::default(), "/a/mtu-ref").expect("leafref");
        assert_eq!(direct, via_ref);
        assert_eq!(via_ref.default_value.as_deref(), Some("1500"));
    }

    #[test]
    fn test_leafref_to_enum_uses_target_name() {
        let mut tree = SchemaTree::new();
        let ifc = tree.add_container(None, "if").unwrap();
        tree.add_leaf(Some(ifc), "mode", SchemaType::enumeration(["UP"]))
            .unwrap();
        tree.add_leaf(None, "current-mode", SchemaType::leafref("/if/mode"))
            .unwrap();

        let mapped = lower(&tree, LoweringConfig::default(), "/current-mode").expect("leafref");
        assert_eq!(mapped.native_type, "If_Mode");
        assert!(mapped.is_enumerated_value);
    }

    #[test]
    fn test_unresolvable_leafref() {
        let mut tree = SchemaTree::new();
        tree.add_leaf(None, "dangling", SchemaType::leafref("../missing"))
            .unwrap();

        let err = lower(&tree, LoweringConfig::default(), "/dangling").unwrap_err();
        match err {
            LoweringError::UnresolvableReference { path, source } => {
                assert_eq!(path, "../missing");
                assert!(matches!(source, SchemaError::PathNotFound { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }

        let no_path = standalone(SchemaType::new(TypeKind::LeafRef)).unwrap_err();
        assert!(matches!(no_path, LoweringError::UnresolvableReference { .. }));
    }

    #[test]
    fn test_cyclic_leafref() {
        let mut tree = SchemaTree::new();
        tree.add_leaf(None, "a", SchemaType::leafref("/b")).unwrap();
        tree.add_leaf(None, "b", SchemaType::leafref("/c")).unwrap();
        tree.add_leaf(None, "c", SchemaType::leafref("/a")).unwrap();
        tree.add_leaf(None, "self", SchemaType::leafref("/self")).unwrap();

        let err = lower(&tree, LoweringConfig::default(), "/a").unwrap_err();
        assert_eq!(
            err,
            LoweringError::CyclicReference {
                chain: vec![
                    "/a".to_string(),
                    "/b".to_string(),
                    "/c".to_string(),
                    "/a".to_string()
                ]
            }
        );

        let err = lower(&tree, LoweringConfig::default(), "/self").unwrap_err();
        assert!(matches!(err, LoweringError::CyclicReference { .. }));
    }

    #[test]
    fn test_reference_chain_unwinds() {
        let mut tree = SchemaTree::new();
        tree.add_leaf(None, "target", SchemaType::new(TypeKind::String))
            .unwrap();
        tree.add_leaf(
            None,
            "either",
            SchemaType::union(vec![
                SchemaType::leafref("/target"),
                SchemaType::leafref("/target"),
            ]),
        )
        .unwrap();

        let mapped = lower(&tree, LoweringConfig::default(), "/either").expect("union of refs");
        assert_eq!(mapped.native_type, "string");
        assert_eq!(mapped.union_arity(), 1);
    }
}
