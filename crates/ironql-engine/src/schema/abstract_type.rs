use crate::Value;
use std::sync::Arc;

/// Maps a resolved value to the name of its concrete object type.
///
/// Consulted when narrowing an interface- or union-typed value whose
/// resolver did not tag it and whose value carries no `__typename`.
pub type TypeResolver = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// An interface type: an abstract type narrowed to one of its
/// implementing objects at completion time.
#[derive(Clone)]
pub struct InterfaceType {
    pub name: String,
    pub resolve_type: Option<TypeResolver>,
}

impl InterfaceType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolve_type: None,
        }
    }

    pub fn with_resolve_type(mut self, resolve_type: TypeResolver) -> Self {
        self.resolve_type = Some(resolve_type);
        self
    }
}

impl std::fmt::Debug for InterfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterfaceType")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A union type: an abstract type over an explicit list of object types.
#[derive(Clone)]
pub struct UnionType {
    pub name: String,
    pub possible_types: Vec<String>,
    pub resolve_type: Option<TypeResolver>,
}

impl UnionType {
    pub fn new(
        name: impl Into<String>,
        possible_types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            possible_types: possible_types.into_iter().map(Into::into).collect(),
            resolve_type: None,
        }
    }

    pub fn with_resolve_type(mut self, resolve_type: TypeResolver) -> Self {
        self.resolve_type = Some(resolve_type);
        self
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.possible_types.iter().any(|name| name == type_name)
    }
}

impl std::fmt::Debug for UnionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionType")
            .field("name", &self.name)
            .field("possible_types", &self.possible_types)
            .finish_non_exhaustive()
    }
}
