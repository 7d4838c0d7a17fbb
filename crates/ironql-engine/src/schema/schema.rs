use crate::schema::EnumType;
use crate::schema::InputObjectType;
use crate::schema::InterfaceType;
use crate::schema::ObjectType;
use crate::schema::ScalarType;
use crate::schema::UnionType;
use indexmap::IndexMap;
use ironql_parser::ast::OperationKind;

/// Any named type a schema can hold.
#[derive(Clone, Debug)]
pub enum TypeDefinition {
    Scalar(ScalarType),
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Scalar(t) => &t.name,
            TypeDefinition::Object(t) => &t.name,
            TypeDefinition::Interface(t) => &t.name,
            TypeDefinition::Union(t) => &t.name,
            TypeDefinition::Enum(t) => &t.name,
            TypeDefinition::InputObject(t) => &t.name,
        }
    }
}

/// The type registry the engine executes against.
///
/// Built once at startup by the embedding application, then shared
/// immutably (the engine never mutates it). The built-in scalars `Int`,
/// `Float`, `String`, `Boolean`, and `ID` are always registered.
#[derive(Debug)]
pub struct Schema {
    types: IndexMap<String, TypeDefinition>,
    query_type: String,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
}

impl Schema {
    /// Creates a schema whose query root is `query`.
    pub fn new(query: ObjectType) -> Self {
        let mut types = IndexMap::new();
        for scalar in [
            ScalarType::int(),
            ScalarType::float(),
            ScalarType::string(),
            ScalarType::boolean(),
            ScalarType::id(),
        ] {
            types.insert(scalar.name.clone(), TypeDefinition::Scalar(scalar));
        }

        let query_type = query.name.clone();
        types.insert(query_type.clone(), TypeDefinition::Object(query));
        Self {
            types,
            query_type,
            mutation_type: None,
            subscription_type: None,
        }
    }

    pub fn with_mutation(mut self, mutation: ObjectType) -> Self {
        self.mutation_type = Some(mutation.name.clone());
        self.types
            .insert(mutation.name.clone(), TypeDefinition::Object(mutation));
        self
    }

    pub fn with_subscription(mut self, subscription: ObjectType) -> Self {
        self.subscription_type = Some(subscription.name.clone());
        self.types.insert(
            subscription.name.clone(),
            TypeDefinition::Object(subscription),
        );
        self
    }

    /// Registers any named type. Replaces an existing type of the same
    /// name (including built-in scalars, for custom coercion).
    pub fn with_type(mut self, type_def: TypeDefinition) -> Self {
        self.types
            .insert(type_def.name().to_string(), type_def);
        self
    }

    pub fn type_named(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        match self.types.get(name) {
            Some(TypeDefinition::Object(object)) => Some(object),
            _ => None,
        }
    }

    pub fn scalar_type(&self, name: &str) -> Option<&ScalarType> {
        match self.types.get(name) {
            Some(TypeDefinition::Scalar(scalar)) => Some(scalar),
            _ => None,
        }
    }

    /// The root object type for an operation kind, if the schema defines
    /// one.
    pub fn root_type(&self, kind: OperationKind) -> Option<&ObjectType> {
        let name = match kind {
            OperationKind::Query => Some(&self.query_type),
            OperationKind::Mutation => self.mutation_type.as_ref(),
            OperationKind::Subscription => self.subscription_type.as_ref(),
        }?;
        self.object_type(name)
    }

    /// All object type names a named type condition applies to:
    /// the object itself, implementers of an interface, or the members of
    /// a union.
    pub fn type_condition_applies(
        &self,
        condition: &str,
        object: &ObjectType,
    ) -> bool {
        if condition == object.name {
            return true;
        }
        if object.interfaces.iter().any(|name| name == condition) {
            return true;
        }
        matches!(
            self.types.get(condition),
            Some(TypeDefinition::Union(union)) if union.contains(&object.name),
        )
    }
}
