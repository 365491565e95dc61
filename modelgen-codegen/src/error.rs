//! Error types for type lowering.

use modelgen_schema::{SchemaError, TypeKind};
use thiserror::Error;

/// Error type for type lowering operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoweringError {
    /// Enumeration or identity reference lowered without its declaring element.
    #[error("cannot map {kind} without context")]
    MissingContext {
        /// Kind that required the context.
        kind: TypeKind,
    },

    /// Context element was created by a different schema tree.
    #[error("context element '{path}' does not belong to the schema tree")]
    ForeignContext {
        /// Path of the context element.
        path: String,
    },

    /// Leaf-reference path could not be resolved.
    #[error("cannot resolve leaf reference '{path}': {source}")]
    UnresolvableReference {
        /// Path expression of the reference.
        path: String,
        /// Path index failure.
        #[source]
        source: SchemaError,
    },

    /// Enumerated typedef is malformed.
    #[error("invalid enumerated typedef '{typedef_name}': {reason}")]
    InvalidEnumeratedTypedef {
        /// Typedef name.
        typedef_name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Identity base is missing or not declared.
    #[error("unknown identity base '{base}'")]
    UnknownIdentityBase {
        /// Qualified base name, or a placeholder when none was given.
        base: String,
    },

    /// One or more union members failed to lower.
    #[error("errors mapping union members: [{}]", join_errors(.errors))]
    AggregateUnion {
        /// Every member failure, in discovery order.
        errors: Vec<LoweringError>,
    },

    /// Leaf-reference chain loops back onto itself.
    #[error("cyclic leaf reference: {}", .chain.join(" -> "))]
    CyclicReference {
        /// Element paths along the chain, ending with the repeated one.
        chain: Vec<String>,
    },
}

impl LoweringError {
    /// Creates an invalid enumerated typedef error.
    pub fn invalid_typedef(typedef_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEnumeratedTypedef {
            typedef_name: typedef_name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unresolvable reference error.
    pub fn unresolvable(path: impl Into<String>, source: SchemaError) -> Self {
        Self::UnresolvableReference {
            path: path.into(),
            source,
        }
    }

    /// Returns the member errors of an aggregate, or the error itself otherwise.
    #[must_use]
    pub fn member_errors(&self) -> &[LoweringError] {
        match self {
            Self::AggregateUnion { errors } => errors,
            other => std::slice::from_ref(other),
        }
    }
}

fn join_errors(errors: &[LoweringError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
