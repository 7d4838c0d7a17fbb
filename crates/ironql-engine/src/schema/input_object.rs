use crate::schema::InputValueDefinition;
use indexmap::IndexMap;

/// An input object type: a named set of input fields for arguments and
/// variables. Never appears in output positions.
#[derive(Clone, Debug)]
pub struct InputObjectType {
    pub name: String,
    pub fields: IndexMap<String, InputValueDefinition>,
}

impl InputObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn field(mut self, field: InputValueDefinition) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }
}
