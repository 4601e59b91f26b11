use serde::{Deserialize, Serialize};

use crate::{Error, TypeRef};

/// Version written into, and required from, the JSON form.
pub const SCHEMA_VERSION: u32 = 1;

/// A GraphQL schema description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchemaDocument {
    pub version: u32,
    pub query_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_type: Option<String>,
    pub types: Vec<TypeDefinition>,
}

/// A named type, tagged by its introspection kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeDefinition {
    Scalar(ScalarType),
    Object(ObjectType),
    Interface(ObjectType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An object or interface type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<InputValue>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
}

/// A field argument or an input object field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
}

/// An input object and the constraint on how many of its fields may be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputObjectType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Required in the JSON form. There is no default.
    pub input_kind: InputObjectKind,
    pub fields: Vec<InputValue>,
}

/// Whether exactly one field of an input object must be provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputObjectKind {
    /// `@oneOf`: exactly one field, and it must not be null.
    OneOf,
    /// Any combination of fields, subject to their own nullability.
    Ordinary,
}

impl InputObjectKind {
    pub fn is_one_of(self) -> bool {
        matches!(self, InputObjectKind::OneOf)
    }
}

impl InputObjectType {
    pub fn new(name: impl Into<String>, input_kind: InputObjectKind, fields: Vec<InputValue>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_kind,
            fields,
        }
    }
}

impl InputValue {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            ty,
        }
    }
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: Vec::new(),
            ty,
            deprecation_reason: None,
        }
    }

    #[must_use]
    pub fn with_argument(mut self, argument: InputValue) -> Self {
        self.arguments.push(argument);
        self
    }
}

impl ObjectType {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            name: name.into(),
            description: None,
            interfaces: Vec::new(),
            fields,
        }
    }
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Scalar(ScalarType { name, .. })
            | TypeDefinition::Object(ObjectType { name, .. })
            | TypeDefinition::Interface(ObjectType { name, .. })
            | TypeDefinition::Union(UnionType { name, .. })
            | TypeDefinition::Enum(EnumType { name, .. })
            | TypeDefinition::InputObject(InputObjectType { name, .. }) => name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            TypeDefinition::Scalar(ScalarType { description, .. })
            | TypeDefinition::Object(ObjectType { description, .. })
            | TypeDefinition::Interface(ObjectType { description, .. })
            | TypeDefinition::Union(UnionType { description, .. })
            | TypeDefinition::Enum(EnumType { description, .. })
            | TypeDefinition::InputObject(InputObjectType { description, .. }) => description.as_deref(),
        }
    }
}

impl SchemaDocument {
    pub fn new(query_type: impl Into<String>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            query_type: query_type.into(),
            mutation_type: None,
            subscription_type: None,
            types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_type(mut self, definition: impl Into<TypeDefinition>) -> Self {
        self.types.push(definition.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|definition| definition.name() == name)
    }

    pub fn input_object(&self, name: &str) -> Option<&InputObjectType> {
        match self.get(name)? {
            TypeDefinition::InputObject(input_object) => Some(input_object),
            _ => None,
        }
    }

    pub fn input_objects(&self) -> impl Iterator<Item = &InputObjectType> + '_ {
        self.types.iter().filter_map(|definition| match definition {
            TypeDefinition::InputObject(input_object) => Some(input_object),
            _ => None,
        })
    }

    pub fn has_one_of_inputs(&self) -> bool {
        self.input_objects().any(|input| input.input_kind.is_one_of())
    }

    /// Pretty JSON form, tagged with [`SCHEMA_VERSION`].
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads the JSON form, refusing documents of another version.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        #[derive(Deserialize)]
        struct Versioned {
            version: u32,
        }

        let Versioned { version } = serde_json::from_str(json)?;

        if version != SCHEMA_VERSION {
            return Err(Error::UnsupportedVersion {
                found: version,
                expected: SCHEMA_VERSION,
            });
        }

        Ok(serde_json::from_str(json)?)
    }
}

impl From<ScalarType> for TypeDefinition {
    fn from(value: ScalarType) -> Self {
        TypeDefinition::Scalar(value)
    }
}

impl From<ObjectType> for TypeDefinition {
    fn from(value: ObjectType) -> Self {
        TypeDefinition::Object(value)
    }
}

impl From<UnionType> for TypeDefinition {
    fn from(value: UnionType) -> Self {
        TypeDefinition::Union(value)
    }
}

impl From<EnumType> for TypeDefinition {
    fn from(value: EnumType) -> Self {
        TypeDefinition::Enum(value)
    }
}

impl From<InputObjectType> for TypeDefinition {
    fn from(value: InputObjectType) -> Self {
        TypeDefinition::InputObject(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> SchemaDocument {
        SchemaDocument::new("Query").with_type(InputObjectType::new(
            "SearchFilterInput",
            InputObjectKind::OneOf,
            vec![InputValue::new("byName", TypeRef::named("String"))],
        ))
    }

    #[test]
    fn json_form_keeps_the_input_kind() {
        let json = document().to_json().unwrap();

        insta::assert_snapshot!(json, @r#"
        {
          "version": 1,
          "queryType": "Query",
          "types": [
            {
              "kind": "INPUT_OBJECT",
              "name": "SearchFilterInput",
              "inputKind": "ONE_OF",
              "fields": [
                {
                  "name": "byName",
                  "type": "String"
                }
              ]
            }
          ]
        }
        "#);

        assert_eq!(SchemaDocument::from_json(&json).unwrap(), document());
    }

    #[test]
    fn json_without_input_kind_is_rejected() {
        let json = r#"{
            "version": 1,
            "queryType": "Query",
            "types": [
                { "kind": "INPUT_OBJECT", "name": "SearchFilterInput", "fields": [] }
            ]
        }"#;

        let err = SchemaDocument::from_json(json).unwrap_err();
        assert!(err.to_string().contains("inputKind"), "{err}");
    }

    #[test]
    fn json_of_another_version_is_rejected() {
        let json = r#"{ "version": 2, "queryType": "Query", "types": [] }"#;

        let err = SchemaDocument::from_json(json).unwrap_err();
        assert_eq!(err.to_string(), "unsupported schema document version 2, expected 1");
    }
}
