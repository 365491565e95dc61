//! Error types for schema tree construction and path resolution.

use thiserror::Error;

/// Error type for schema tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Path expression is malformed.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// Offending path expression.
        path: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A path segment does not name an element.
    #[error("path '{path}' not found: no element '{segment}'")]
    PathNotFound {
        /// Path expression being resolved.
        path: String,
        /// First segment that could not be matched.
        segment: String,
    },

    /// Relative path resolved without a context element.
    #[error("relative path '{path}' requires a context element")]
    RelativePathWithoutContext {
        /// Relative path expression.
        path: String,
    },

    /// Path walks above the root of the tree.
    #[error("path '{path}' escapes the schema root")]
    PathEscapesRoot {
        /// Path expression.
        path: String,
    },

    /// Path designates an element that is not a leaf or leaf-list.
    #[error("path '{path}' does not designate a leaf")]
    NotALeaf {
        /// Path expression.
        path: String,
    },

    /// Element was created by a different tree.
    #[error("element '{path}' is not part of this schema tree")]
    ForeignElement {
        /// Path of the element.
        path: String,
    },

    /// An element with the same path already exists.
    #[error("duplicate element definition: '{path}'")]
    DuplicateElement {
        /// Path of the duplicate.
        path: String,
    },
}

impl SchemaError {
    /// Creates an invalid path error.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a path not found error.
    pub fn not_found(path: impl Into<String>, segment: impl Into<String>) -> Self {
        Self::PathNotFound {
            path: path.into(),
            segment: segment.into(),
        }
    }
}
