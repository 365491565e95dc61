//! Union flattening.
//!
//! Nested unions are flattened into one member list, members are
//! de-duplicated by native type name in first-seen order, and every member
//! failure is collected before the union is reported as failed.

use crate::error::LoweringError;
use crate::lower::{ReferenceChain, TypeLowerer, with_enum_default};
use crate::mapped::MappedType;
use crate::native::ABSENT_VALUE;
use indexmap::IndexMap;
use modelgen_schema::{SchemaElement, SchemaType, TypeKind, path_to_camel_case};

/// Transient state for lowering one union.
pub(crate) struct UnionFlattener<'l, 'a> {
    lowerer: &'l TypeLowerer<'a>,
    /// Native type name to member position.
    member_index: IndexMap<String, usize>,
    /// Member mapping by position.
    member_types: Vec<MappedType>,
    errors: Vec<LoweringError>,
}

impl<'l, 'a> UnionFlattener<'l, 'a> {
    pub(crate) fn new(lowerer: &'l TypeLowerer<'a>) -> Self {
        Self {
            lowerer,
            member_index: IndexMap::new(),
            member_types: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Lowers the union `schema_type` declared at `context`.
    pub(crate) fn flatten(
        mut self,
        schema_type: &SchemaType,
        context: Option<&SchemaElement>,
        chain: &mut ReferenceChain,
    ) -> Result<MappedType, LoweringError> {
        for member in &schema_type.members {
            self.collect(member, context, chain);
        }
        self.finish(context)
    }

    fn collect(
        &mut self,
        member: &SchemaType,
        context: Option<&SchemaElement>,
        chain: &mut ReferenceChain,
    ) {
        if member.kind == TypeKind::Union {
            for nested in &member.members {
                self.collect(nested, context, chain);
            }
            return;
        }

        // The context is the union's leaf, so identity members are named
        // from their own base.
        let resolved = match member.kind {
            TypeKind::IdentityRef => self
                .lowerer
                .registry()
                .lookup_identity(member.identity_base.as_ref())
                .map(|mapped| with_enum_default(mapped, member.raw_default.as_deref())),
            _ => self.lowerer.resolve_with(member, context, chain),
        };

        match resolved {
            Ok(mapped) => self.insert(mapped),
            Err(err) => self.errors.push(err),
        }
    }

    fn insert(&mut self, mapped: MappedType) {
        if self.member_index.contains_key(&mapped.native_type) {
            return;
        }
        let position = self.member_types.len();
        self.member_index.insert(mapped.native_type.clone(), position);
        self.member_types.push(mapped);
    }

    fn finish(self, context: Option<&SchemaElement>) -> Result<MappedType, LoweringError> {
        if !self.errors.is_empty() {
            return Err(LoweringError::AggregateUnion {
                errors: self.errors,
            });
        }

        let mut members = self.member_types.into_iter();
        if let (Some(mut single), None) = (members.next(), members.next()) {
            single.union_members = Some(self.member_index);
            return Ok(single);
        }

        let context = context.ok_or(LoweringError::MissingContext {
            kind: TypeKind::Union,
        })?;
        let native_type = format!(
            "{}_Union",
            path_to_camel_case(
                self.lowerer.tree(),
                context,
                self.lowerer.config().compress_paths
            )
        );
        tracing::debug!(
            "Union at {} lowered to {} with {} members",
            context.path(),
            native_type,
            self.member_index.len()
        );
        Ok(MappedType {
            native_type,
            zero_value: ABSENT_VALUE.to_string(),
            union_members: Some(self.member_index),
            ..MappedType::default()
        })
    }
}
