use crate::schema::Resolver;
use crate::schema::TypeRef;
use crate::Value;
use indexmap::IndexMap;

/// An output object type: named fields, each with a declared type,
/// arguments, and an optional resolver delegate.
#[derive(Clone)]
pub struct ObjectType {
    pub name: String,
    pub fields: IndexMap<String, FieldDefinition>,
    /// Names of interfaces this object implements, for type-condition
    /// matching and abstract-type narrowing.
    pub interfaces: Vec<String>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
            interfaces: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }
}

impl std::fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectType")
            .field("name", &self.name)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("interfaces", &self.interfaces)
            .finish()
    }
}

/// One field of an object type.
#[derive(Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub field_type: TypeRef,
    pub arguments: Vec<InputValueDefinition>,
    /// Absent means the default property resolver: look the field name up
    /// in the parent object value.
    pub resolver: Option<Resolver>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            field_type,
            arguments: Vec::new(),
            resolver: None,
        }
    }

    pub fn argument(mut self, argument: InputValueDefinition) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn resolve(mut self, resolver: Resolver) -> Self {
        self.resolver = Some(resolver);
        self
    }
}

impl std::fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("arguments", &self.arguments)
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}

/// A declared input: a field argument or an input object field.
#[derive(Clone, Debug)]
pub struct InputValueDefinition {
    pub name: String,
    pub value_type: TypeRef,
    pub default_value: Option<Value>,
}

impl InputValueDefinition {
    pub fn new(name: impl Into<String>, value_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            value_type,
            default_value: None,
        }
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}
