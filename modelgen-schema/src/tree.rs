//! Schema tree.
//!
//! An arena of [`SchemaElement`]s with non-owning parent links. The tree owns
//! every element and every [`SchemaType`]; the lowering engine only borrows
//! them as context. The tree also acts as the path index used to resolve
//! leaf-reference targets.

use crate::error::SchemaError;
use crate::types::{Identity, SchemaType};
use std::collections::{HashMap, HashSet};

/// Index of an element within its [`SchemaTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    /// Returns the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Kind of a schema element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Grouping of child elements.
    Container,
    /// Keyed collection of entries.
    List,
    /// Scalar-typed element.
    Leaf,
    /// Collection of scalar values.
    LeafList,
    /// Set of mutually exclusive cases.
    Choice,
    /// One branch of a choice.
    Case,
}

impl ElementKind {
    /// Returns true for leaves and leaf-lists.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf | Self::LeafList)
    }

    /// Returns true for schema-only nodes that do not appear in data paths.
    #[must_use]
    pub const fn is_choice_or_case(&self) -> bool {
        matches!(self, Self::Choice | Self::Case)
    }
}

/// A named position in the schema tree.
#[derive(Debug, Clone)]
pub struct SchemaElement {
    /// Index of this element in its tree.
    pub id: ElementId,
    /// Local name.
    pub name: String,
    /// Element kind.
    pub kind: ElementKind,
    /// Declared type (leaves and leaf-lists only).
    pub schema_type: Option<SchemaType>,
    /// Parent element, `None` at the top level.
    pub parent: Option<ElementId>,
    children: Vec<ElementId>,
    path: String,
}

impl SchemaElement {
    /// Returns the schema path of the element, e.g. `/interfaces/interface/name`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the ids of the direct children in declaration order.
    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Returns true if the element is a leaf or leaf-list.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }
}

/// Arena-backed schema tree.
#[derive(Debug, Clone, Default)]
pub struct SchemaTree {
    elements: Vec<SchemaElement>,
    roots: Vec<ElementId>,
    /// Path lookup map (maintained on insert).
    path_map: HashMap<String, ElementId>,
    identities: Vec<Identity>,
    identity_names: HashSet<String>,
}

impl SchemaTree {
    /// Creates a new empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element under `parent`, or at the top level when `parent` is `None`.
    ///
    /// # Errors
    /// Returns `SchemaError::DuplicateElement` if an element with the same path exists.
    ///
    /// # Panics
    /// Panics if `parent` does not belong to this tree.
    pub fn add_element(
        &mut self,
        parent: Option<ElementId>,
        name: impl Into<String>,
        kind: ElementKind,
        schema_type: Option<SchemaType>,
    ) -> Result<ElementId, SchemaError> {
        let name = name.into();
        let path = match parent {
            Some(p) => format!("{}/{}", self.elements[p.0].path, name),
            None => format!("/{}", name),
        };
        if self.path_map.contains_key(&path) {
            return Err(SchemaError::DuplicateElement { path });
        }

        let id = ElementId(self.elements.len());
        self.path_map.insert(path.clone(), id);
        self.elements.push(SchemaElement {
            id,
            name,
            kind,
            schema_type,
            parent,
            children: Vec::new(),
            path,
        });
        match parent {
            Some(p) => self.elements[p.0].children.push(id),
            None => self.roots.push(id),
        }
        Ok(id)
    }

    /// Adds a container.
    ///
    /// # Errors
    /// Returns `SchemaError::DuplicateElement` if the path is taken.
    pub fn add_container(
        &mut self,
        parent: Option<ElementId>,
        name: impl Into<String>,
    ) -> Result<ElementId, SchemaError> {
        self.add_element(parent, name, ElementKind::Container, None)
    }

    /// Adds a list.
    ///
    /// # Errors
    /// Returns `SchemaError::DuplicateElement` if the path is taken.
    pub fn add_list(
        &mut self,
        parent: Option<ElementId>,
        name: impl Into<String>,
    ) -> Result<ElementId, SchemaError> {
        self.add_element(parent, name, ElementKind::List, None)
    }

    /// Adds a choice.
    ///
    /// # Errors
    /// Returns `SchemaError::DuplicateElement` if the path is taken.
    pub fn add_choice(
        &mut self,
        parent: Option<ElementId>,
        name: impl Into<String>,
    ) -> Result<ElementId, SchemaError> {
        self.add_element(parent, name, ElementKind::Choice, None)
    }

    /// Adds a case.
    ///
    /// # Errors
    /// Returns `SchemaError::DuplicateElement` if the path is taken.
    pub fn add_case(
        &mut self,
        parent: Option<ElementId>,
        name: impl Into<String>,
    ) -> Result<ElementId, SchemaError> {
        self.add_element(parent, name, ElementKind::Case, None)
    }

    /// Adds a leaf of the given type.
    ///
    /// # Errors
    /// Returns `SchemaError::DuplicateElement` if the path is taken.
    pub fn add_leaf(
        &mut self,
        parent: Option<ElementId>,
        name: impl Into<String>,
        schema_type: SchemaType,
    ) -> Result<ElementId, SchemaError> {
        self.add_element(parent, name, ElementKind::Leaf, Some(schema_type))
    }

    /// Adds a leaf-list of the given type.
    ///
    /// # Errors
    /// Returns `SchemaError::DuplicateElement` if the path is taken.
    pub fn add_leaf_list(
        &mut self,
        parent: Option<ElementId>,
        name: impl Into<String>,
        schema_type: SchemaType,
    ) -> Result<ElementId, SchemaError> {
        self.add_element(parent, name, ElementKind::LeafList, Some(schema_type))
    }

    /// Returns the element with the given id.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn get(&self, id: ElementId) -> &SchemaElement {
        &self.elements[id.0]
    }

    /// Looks up an element by its schema path.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&SchemaElement> {
        self.path_map.get(path).map(|&id| &self.elements[id.0])
    }

    /// Returns the parent of an element.
    #[must_use]
    pub fn parent(&self, element: &SchemaElement) -> Option<&SchemaElement> {
        element.parent.and_then(|id| self.elements.get(id.0))
    }

    /// Iterates over the direct children of an element.
    pub fn children<'a>(
        &'a self,
        element: &'a SchemaElement,
    ) -> impl Iterator<Item = &'a SchemaElement> + 'a {
        element
            .children
            .iter()
            .filter_map(|&id| self.elements.get(id.0))
    }

    /// Iterates over the top-level elements.
    pub fn roots(&self) -> impl Iterator<Item = &SchemaElement> {
        self.roots.iter().map(|&id| &self.elements[id.0])
    }

    /// Returns the element and its ancestors, outermost first.
    #[must_use]
    pub fn ancestry<'a>(&'a self, element: &'a SchemaElement) -> Vec<&'a SchemaElement> {
        let mut lineage = vec![element];
        let mut current = element;
        while let Some(parent) = self.parent(current) {
            lineage.push(parent);
            current = parent;
        }
        lineage.reverse();
        lineage
    }

    /// Returns true if `element` was created by this tree.
    #[must_use]
    pub fn contains(&self, element: &SchemaElement) -> bool {
        self.elements
            .get(element.id.0)
            .is_some_and(|own| own.path == element.path)
    }

    /// Iterates over all elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &SchemaElement> {
        self.elements.iter()
    }

    /// Iterates over every element carrying a type, in insertion order.
    pub fn typed_elements(&self) -> impl Iterator<Item = (&SchemaElement, &SchemaType)> {
        self.elements
            .iter()
            .filter_map(|e| e.schema_type.as_ref().map(|ty| (e, ty)))
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the tree has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Declares an identity. Returns false if it was already declared.
    pub fn add_identity(&mut self, identity: Identity) -> bool {
        if !self.identity_names.insert(identity.qualified_name()) {
            return false;
        }
        self.identities.push(identity);
        true
    }

    /// Returns true if the identity has been declared.
    #[must_use]
    pub fn has_identity(&self, identity: &Identity) -> bool {
        self.identity_names.contains(&identity.qualified_name())
    }

    /// Returns the declared identities in declaration order.
    #[must_use]
    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    /// Resolves a leaf-reference path expression to the leaf it designates.
    ///
    /// Absolute paths start at the top level; relative paths start at
    /// `context`. Predicates and module prefixes are ignored, and choice/case
    /// nodes are transparent.
    ///
    /// # Errors
    /// Returns `SchemaError` if the path is malformed, cannot be followed, or
    /// does not end at a leaf or leaf-list.
    pub fn resolve_reference(
        &self,
        path: &str,
        context: Option<&SchemaElement>,
    ) -> Result<&SchemaElement, SchemaError> {
        let stripped = strip_predicates(path)?;
        let expr = stripped.trim();
        if expr.is_empty() {
            return Err(SchemaError::invalid_path(path, "empty path"));
        }

        let mut current = if expr.starts_with('/') {
            None
        } else {
            let ctx = context.ok_or_else(|| SchemaError::RelativePathWithoutContext {
                path: path.to_string(),
            })?;
            if !self.contains(ctx) {
                return Err(SchemaError::ForeignElement {
                    path: ctx.path().to_string(),
                });
            }
            Some(ctx.id)
        };

        for raw in expr.split('/').filter(|s| !s.is_empty()) {
            let segment = raw.rsplit_once(':').map_or(raw, |(_, local)| local).trim();
            match segment {
                "." => {}
                ".." => {
                    let id = current.ok_or_else(|| SchemaError::PathEscapesRoot {
                        path: path.to_string(),
                    })?;
                    current = self.data_parent(id);
                }
                name => {
                    let child = self
                        .data_child(current, name)
                        .ok_or_else(|| SchemaError::not_found(path, name))?;
                    current = Some(child);
                }
            }
        }

        let element = current
            .map(|id| &self.elements[id.0])
            .filter(|e| e.is_leaf())
            .ok_or_else(|| SchemaError::NotALeaf {
                path: path.to_string(),
            })?;
        Ok(element)
    }

    /// Returns the nearest ancestor that appears in data paths.
    fn data_parent(&self, id: ElementId) -> Option<ElementId> {
        let mut parent = self.elements[id.0].parent;
        while let Some(p) = parent {
            if !self.elements[p.0].kind.is_choice_or_case() {
                return Some(p);
            }
            parent = self.elements[p.0].parent;
        }
        None
    }

    /// Finds a data child by name, looking through choice/case nodes.
    fn data_child(&self, parent: Option<ElementId>, name: &str) -> Option<ElementId> {
        let candidates = match parent {
            Some(p) => &self.elements[p.0].children,
            None => &self.roots,
        };
        candidates.iter().find_map(|&id| {
            let element = &self.elements[id.0];
            if element.kind.is_choice_or_case() {
                self.data_child(Some(id), name)
            } else if element.name == name {
                Some(id)
            } else {
                None
            }
        })
    }
}

/// Removes `[...]` predicates from a path expression.
fn strip_predicates(path: &str) -> Result<String, SchemaError> {
    let mut out = String::with_capacity(path.len());
    let mut depth = 0usize;
    for c in path.chars() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| SchemaError::invalid_path(path, "unbalanced predicate"))?;
            }
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    if depth != 0 {
        return Err(SchemaError::invalid_path(path, "unbalanced predicate"));
    }
    Ok(out)
}
