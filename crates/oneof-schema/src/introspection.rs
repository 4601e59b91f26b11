use serde::{Deserialize, Serialize};

use crate::{
    is_builtin, EnumType, EnumValue, Error, FieldDefinition, InputObjectKind, InputObjectType, InputValue, ObjectType,
    ScalarType, SchemaDocument, TypeDefinition, TypeRef, UnionType,
};

/// Which introspection query to send.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntrospectionCapabilities {
    /// Requests `isOneOf` on every type.
    #[default]
    Modern,
    /// The query older tooling sends, without `isOneOf`. Input objects come
    /// back without any one-of information.
    Legacy,
}

impl IntrospectionCapabilities {
    pub fn query(self) -> String {
        let one_of = match self {
            IntrospectionCapabilities::Modern => "isOneOf",
            IntrospectionCapabilities::Legacy => "",
        };

        indoc::formatdoc! {r#"
            query IntrospectionQuery {{
              __schema {{
                queryType {{ name }}
                mutationType {{ name }}
                subscriptionType {{ name }}
                types {{
                  ...FullType
                }}
              }}
            }}

            fragment FullType on __Type {{
              kind
              name
              description
              {one_of}
              fields(includeDeprecated: true) {{
                name
                description
                args {{
                  ...InputValue
                }}
                type {{
                  ...TypeRef
                }}
                isDeprecated
                deprecationReason
              }}
              inputFields {{
                ...InputValue
              }}
              interfaces {{
                ...TypeRef
              }}
              enumValues(includeDeprecated: true) {{
                name
                description
                isDeprecated
                deprecationReason
              }}
              possibleTypes {{
                ...TypeRef
              }}
            }}

            fragment InputValue on __InputValue {{
              name
              description
              type {{
                ...TypeRef
              }}
            }}

            fragment TypeRef on __Type {{
              kind
              name
              ofType {{
                kind
                name
                ofType {{
                  kind
                  name
                  ofType {{
                    kind
                    name
                    ofType {{
                      kind
                      name
                    }}
                  }}
                }}
              }}
            }}
        "#}
    }
}

/// The `data` of an introspection response.
#[derive(Debug, Clone, Deserialize)]
pub struct IntrospectionData {
    #[serde(rename = "__schema")]
    pub schema: IntrospectionSchema,
}

/// The `__schema` object of an introspection response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    query_type: RootType,
    mutation_type: Option<RootType>,
    subscription_type: Option<RootType>,
    types: Vec<FullType>,
}

#[derive(Debug, Clone, Deserialize)]
struct RootType {
    name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FullType {
    kind: TypeKind,
    name: String,
    description: Option<String>,
    #[serde(default)]
    is_one_of: Option<bool>,
    #[serde(default)]
    fields: Option<Vec<IntrospectedField>>,
    #[serde(default)]
    input_fields: Option<Vec<IntrospectedInputValue>>,
    #[serde(default)]
    interfaces: Option<Vec<IntrospectedTypeRef>>,
    #[serde(default)]
    enum_values: Option<Vec<IntrospectedEnumValue>>,
    #[serde(default)]
    possible_types: Option<Vec<IntrospectedTypeRef>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectedField {
    name: String,
    description: Option<String>,
    #[serde(default)]
    args: Vec<IntrospectedInputValue>,
    #[serde(rename = "type")]
    ty: IntrospectedTypeRef,
    #[serde(default)]
    is_deprecated: bool,
    deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectedInputValue {
    name: String,
    description: Option<String>,
    #[serde(rename = "type")]
    ty: IntrospectedTypeRef,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectedEnumValue {
    name: String,
    description: Option<String>,
    #[serde(default)]
    is_deprecated: bool,
    deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectedTypeRef {
    kind: TypeKind,
    name: Option<String>,
    of_type: Option<Box<IntrospectedTypeRef>>,
}

impl IntrospectedTypeRef {
    fn to_type_ref(&self, owner: &str) -> crate::Result<TypeRef> {
        let malformed = || Error::MalformedIntrospectedType(owner.to_string());

        match self.kind {
            TypeKind::NonNull => Ok(self.of_type.as_ref().ok_or_else(malformed)?.to_type_ref(owner)?.non_null()),
            TypeKind::List => Ok(self.of_type.as_ref().ok_or_else(malformed)?.to_type_ref(owner)?.list()),
            _ => self.name.clone().map(TypeRef::Named).ok_or_else(malformed),
        }
    }

    fn named(&self, owner: &str) -> crate::Result<String> {
        self.name
            .clone()
            .ok_or_else(|| Error::MalformedIntrospectedType(owner.to_string()))
    }
}

impl IntrospectedInputValue {
    fn convert(&self, owner: &str) -> crate::Result<InputValue> {
        Ok(InputValue {
            name: self.name.clone(),
            description: self.description.clone(),
            ty: self.ty.to_type_ref(owner)?,
        })
    }
}

impl SchemaDocument {
    /// Builds a schema description from an introspection result.
    ///
    /// With [`IntrospectionCapabilities::Modern`], an input object without an
    /// `isOneOf` value is an error. With [`IntrospectionCapabilities::Legacy`]
    /// the marker was never asked for, and every input object is recorded as
    /// [`InputObjectKind::Ordinary`] with a warning.
    pub fn from_introspection(
        schema: &IntrospectionSchema,
        capabilities: IntrospectionCapabilities,
    ) -> crate::Result<Self> {
        let mut document = SchemaDocument::new(schema.query_type.name.clone());
        document.mutation_type = schema.mutation_type.as_ref().map(|root| root.name.clone());
        document.subscription_type = schema.subscription_type.as_ref().map(|root| root.name.clone());

        for full_type in schema.types.iter().filter(|ty| !is_builtin(&ty.name)) {
            document.types.push(convert_type(full_type, capabilities)?);
        }

        Ok(document)
    }
}

fn convert_type(full_type: &FullType, capabilities: IntrospectionCapabilities) -> crate::Result<TypeDefinition> {
    let name = full_type.name.clone();
    let description = full_type.description.clone();

    let definition = match full_type.kind {
        TypeKind::Scalar => ScalarType { name, description }.into(),
        TypeKind::Object | TypeKind::Interface => {
            let object = ObjectType {
                interfaces: full_type
                    .interfaces
                    .iter()
                    .flatten()
                    .map(|interface| interface.named(&name))
                    .collect::<crate::Result<_>>()?,
                fields: full_type
                    .fields
                    .iter()
                    .flatten()
                    .map(|field| convert_field(&name, field))
                    .collect::<crate::Result<_>>()?,
                name,
                description,
            };

            if full_type.kind == TypeKind::Object {
                TypeDefinition::Object(object)
            } else {
                TypeDefinition::Interface(object)
            }
        }
        TypeKind::Union => UnionType {
            members: full_type
                .possible_types
                .iter()
                .flatten()
                .map(|member| member.named(&name))
                .collect::<crate::Result<_>>()?,
            name,
            description,
        }
        .into(),
        TypeKind::Enum => EnumType {
            values: full_type
                .enum_values
                .iter()
                .flatten()
                .map(|value| EnumValue {
                    name: value.name.clone(),
                    description: value.description.clone(),
                    deprecation_reason: deprecation(value.is_deprecated, value.deprecation_reason.as_deref()),
                })
                .collect(),
            name,
            description,
        }
        .into(),
        TypeKind::InputObject => {
            let input_kind = match (full_type.is_one_of, capabilities) {
                (Some(true), _) => InputObjectKind::OneOf,
                (Some(false), _) => InputObjectKind::Ordinary,
                (None, IntrospectionCapabilities::Legacy) => {
                    tracing::warn!(
                        input_object = %name,
                        "isOneOf was not requested, recording the input object as ordinary"
                    );
                    InputObjectKind::Ordinary
                }
                (None, IntrospectionCapabilities::Modern) => return Err(Error::MissingOneOfMarker(name)),
            };

            InputObjectType {
                fields: full_type
                    .input_fields
                    .iter()
                    .flatten()
                    .map(|field| field.convert(&name))
                    .collect::<crate::Result<_>>()?,
                name,
                description,
                input_kind,
            }
            .into()
        }
        TypeKind::List | TypeKind::NonNull => return Err(Error::MalformedIntrospectedType(name)),
    };

    Ok(definition)
}

fn convert_field(owner: &str, field: &IntrospectedField) -> crate::Result<FieldDefinition> {
    Ok(FieldDefinition {
        name: field.name.clone(),
        description: field.description.clone(),
        arguments: field
            .args
            .iter()
            .map(|argument| argument.convert(owner))
            .collect::<crate::Result<_>>()?,
        ty: field.ty.to_type_ref(owner)?,
        deprecation_reason: deprecation(field.is_deprecated, field.deprecation_reason.as_deref()),
    })
}

fn deprecation(is_deprecated: bool, reason: Option<&str>) -> Option<String> {
    is_deprecated.then(|| reason.unwrap_or("No longer supported").to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn filter_type(is_one_of: Option<bool>) -> serde_json::Value {
        let mut ty = json!({
            "kind": "INPUT_OBJECT",
            "name": "SearchFilterInput",
            "description": "Example input type using @oneOf directive",
            "fields": null,
            "inputFields": [
                { "name": "byName", "description": null, "type": { "kind": "SCALAR", "name": "String", "ofType": null } },
                { "name": "byId", "description": null, "type": { "kind": "SCALAR", "name": "ID", "ofType": null } },
                { "name": "byCategory", "description": null, "type": { "kind": "SCALAR", "name": "String", "ofType": null } }
            ],
            "interfaces": null,
            "enumValues": null,
            "possibleTypes": null
        });

        if let Some(is_one_of) = is_one_of {
            ty["isOneOf"] = json!(is_one_of);
        }

        ty
    }

    fn introspection(is_one_of: Option<bool>) -> IntrospectionData {
        serde_json::from_value(json!({
            "__schema": {
                "queryType": { "name": "Query" },
                "mutationType": null,
                "subscriptionType": null,
                "types": [
                    {
                        "kind": "OBJECT",
                        "name": "Query",
                        "description": null,
                        "fields": [
                            {
                                "name": "search",
                                "description": null,
                                "args": [
                                    {
                                        "name": "filter",
                                        "description": null,
                                        "type": {
                                            "kind": "NON_NULL",
                                            "name": null,
                                            "ofType": { "kind": "INPUT_OBJECT", "name": "SearchFilterInput", "ofType": null }
                                        }
                                    }
                                ],
                                "type": {
                                    "kind": "NON_NULL",
                                    "name": null,
                                    "ofType": {
                                        "kind": "LIST",
                                        "name": null,
                                        "ofType": {
                                            "kind": "NON_NULL",
                                            "name": null,
                                            "ofType": { "kind": "OBJECT", "name": "SearchResult", "ofType": null }
                                        }
                                    }
                                },
                                "isDeprecated": false,
                                "deprecationReason": null
                            }
                        ],
                        "inputFields": null,
                        "interfaces": [],
                        "enumValues": null,
                        "possibleTypes": null
                    },
                    filter_type(is_one_of),
                    {
                        "kind": "SCALAR",
                        "name": "String",
                        "description": "The `String` scalar type",
                        "fields": null,
                        "inputFields": null,
                        "interfaces": null,
                        "enumValues": null,
                        "possibleTypes": null
                    },
                    {
                        "kind": "OBJECT",
                        "name": "__Schema",
                        "description": null,
                        "fields": [],
                        "inputFields": null,
                        "interfaces": [],
                        "enumValues": null,
                        "possibleTypes": null
                    }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn modern_introspection_keeps_one_of() {
        let data = introspection(Some(true));
        let document = SchemaDocument::from_introspection(&data.schema, IntrospectionCapabilities::Modern).unwrap();

        assert_eq!(
            document.input_object("SearchFilterInput").unwrap().input_kind,
            InputObjectKind::OneOf
        );
        assert_eq!(
            document.types.iter().map(TypeDefinition::name).collect::<Vec<_>>(),
            ["Query", "SearchFilterInput"]
        );

        let Some(TypeDefinition::Object(query)) = document.get("Query") else {
            unreachable!("Query is an object type");
        };
        assert_eq!(query.fields[0].ty.to_string(), "[SearchResult!]!");
        assert_eq!(query.fields[0].arguments[0].ty.to_string(), "SearchFilterInput!");
    }

    #[test]
    fn modern_introspection_without_marker_is_an_error() {
        let data = introspection(None);
        let err = SchemaDocument::from_introspection(&data.schema, IntrospectionCapabilities::Modern).unwrap_err();

        assert_eq!(
            err.to_string(),
            "input object `SearchFilterInput` has no isOneOf marker in the introspection result"
        );
    }

    #[test]
    fn legacy_introspection_records_an_ordinary_input() {
        let data = introspection(None);
        let document = SchemaDocument::from_introspection(&data.schema, IntrospectionCapabilities::Legacy).unwrap();

        assert_eq!(
            document.input_object("SearchFilterInput").unwrap().input_kind,
            InputObjectKind::Ordinary
        );
    }

    #[test]
    fn explicit_false_marker_is_ordinary() {
        let data = introspection(Some(false));
        let document = SchemaDocument::from_introspection(&data.schema, IntrospectionCapabilities::Modern).unwrap();

        assert_eq!(
            document.input_object("SearchFilterInput").unwrap().input_kind,
            InputObjectKind::Ordinary
        );
    }

    #[test]
    fn only_the_modern_query_asks_for_the_marker() {
        assert!(IntrospectionCapabilities::Modern.query().contains("isOneOf"));
        assert!(!IntrospectionCapabilities::Legacy.query().contains("isOneOf"));
    }
}
