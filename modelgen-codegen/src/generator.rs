//! Whole-tree lowering.

use crate::config::LoweringConfig;
use crate::error::LoweringError;
use crate::lower::TypeLowerer;
use crate::mapped::MappedType;
use crate::registry::TypeRegistry;
use indexmap::IndexMap;
use modelgen_schema::SchemaTree;
use serde::{Serialize, Serializer};

/// A leaf whose type could not be lowered.
///
/// Serializes as `{"path": ..., "error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafFailure {
    /// Schema path of the leaf.
    pub path: String,
    /// Reason the leaf failed.
    #[serde(serialize_with = "serialize_error")]
    pub error: LoweringError,
}

fn serialize_error<S>(error: &LoweringError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(error)
}

/// Result of lowering every typed element of a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoweringReport {
    /// Mapped types keyed by schema path, in tree order.
    pub mapped: IndexMap<String, MappedType>,
    /// Leaves that failed to lower, in tree order.
    pub failures: Vec<LeafFailure>,
}

impl LoweringReport {
    /// Returns true if no leaf failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the mapping of the leaf at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&MappedType> {
        self.mapped.get(path)
    }

    /// Returns the failure recorded for `path`.
    #[must_use]
    pub fn failure(&self, path: &str) -> Option<&LoweringError> {
        self.failures
            .iter()
            .find(|f| f.path == path)
            .map(|f| &f.error)
    }
}

/// Lowers every leaf and leaf-list of a schema tree.
///
/// A failing leaf does not stop the run; its error is recorded in the
/// report and the remaining leaves are still lowered.
pub struct Generator<'a> {
    lowerer: TypeLowerer<'a>,
}

impl<'a> Generator<'a> {
    /// Creates a new generator over `tree` using `registry` for names.
    #[must_use]
    pub fn new(
        tree: &'a SchemaTree,
        registry: &'a dyn TypeRegistry,
        config: LoweringConfig,
    ) -> Self {
        Self {
            lowerer: TypeLowerer::new(tree, registry, config),
        }
    }

    /// Returns the underlying lowerer.
    #[must_use]
    pub const fn lowerer(&self) -> &TypeLowerer<'a> {
        &self.lowerer
    }

    /// Lowers the whole tree.
    #[must_use]
    pub fn generate(&self) -> LoweringReport {
        let mut report = LoweringReport::default();

        for (element, schema_type) in self.lowerer.tree().typed_elements() {
            match self.lowerer.resolve(schema_type, Some(element)) {
                Ok(mapped) => {
                    report.mapped.insert(element.path().to_string(), mapped);
                }
                Err(error) => {
                    tracing::warn!("Failed to lower {}: {}", element.path(), error);
                    report.failures.push(LeafFailure {
                        path: element.path().to_string(),
                        error,
                    });
                }
            }
        }

        tracing::info!(
            "Lowered {} leaves ({} failed)",
            report.mapped.len(),
            report.failures.len()
        );
        report
    }
}
