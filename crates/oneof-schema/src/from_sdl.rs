use cynic_parser::type_system::{self as ast, Definition, StringLiteralKind, TypeDefinition as AstTypeDefinition};

use crate::{
    is_builtin, EnumType, EnumValue, Error, FieldDefinition, InputObjectKind, InputObjectType, InputValue, ObjectType,
    ScalarType, SchemaDocument, TypeDefinition, TypeRef, UnionType,
};

const ONE_OF: &str = "oneOf";
const DEPRECATED: &str = "deprecated";
const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

impl SchemaDocument {
    /// Parses SDL into a schema description. Input objects carrying `@oneOf`
    /// become [`InputObjectKind::OneOf`], every other input object is
    /// [`InputObjectKind::Ordinary`].
    pub fn from_sdl(sdl: &str) -> crate::Result<Self> {
        let document = cynic_parser::parse_type_system_document(sdl).map_err(|err| Error::Sdl(err.to_string()))?;

        let mut query_type = None;
        let mut mutation_type = None;
        let mut subscription_type = None;
        let mut types = Vec::new();

        for definition in document.definitions() {
            match definition {
                Definition::Schema(schema) => {
                    query_type = schema.query_type().map(|root| root.named_type().to_string());
                    mutation_type = schema.mutation_type().map(|root| root.named_type().to_string());
                    subscription_type = schema.subscription_type().map(|root| root.named_type().to_string());
                }
                Definition::Type(ty) if !is_builtin(ty.name()) => types.push(convert_type(ty)),
                _ => (),
            }
        }

        let has_type = |name: &str| types.iter().any(|ty: &TypeDefinition| ty.name() == name);

        let query_type = query_type.unwrap_or_else(|| "Query".to_string());
        let mutation_type = mutation_type.or_else(|| has_type("Mutation").then(|| "Mutation".to_string()));
        let subscription_type =
            subscription_type.or_else(|| has_type("Subscription").then(|| "Subscription".to_string()));

        Ok(SchemaDocument {
            mutation_type,
            subscription_type,
            types,
            ..SchemaDocument::new(query_type)
        })
    }
}

fn convert_type(ty: AstTypeDefinition<'_>) -> TypeDefinition {
    let name = ty.name().to_string();
    let description = ty.description().map(description_text);

    match ty {
        AstTypeDefinition::Scalar(_) => ScalarType { name, description }.into(),
        AstTypeDefinition::Object(object) => ObjectType {
            name,
            description,
            interfaces: object.implements_interfaces().map(str::to_string).collect(),
            fields: object.fields().map(|field| convert_field(field)).collect(),
        }
        .into(),
        AstTypeDefinition::Interface(interface) => TypeDefinition::Interface(ObjectType {
            name,
            description,
            interfaces: interface.implements_interfaces().map(str::to_string).collect(),
            fields: interface.fields().map(|field| convert_field(field)).collect(),
        }),
        AstTypeDefinition::Union(union) => UnionType {
            name,
            description,
            members: union.members().map(|member| member.name().to_string()).collect(),
        }
        .into(),
        AstTypeDefinition::Enum(enm) => EnumType {
            name,
            description,
            values: enm
                .values()
                .map(|value| EnumValue {
                    name: value.value().to_string(),
                    description: value.description().map(description_text),
                    deprecation_reason: deprecation_reason(value.directives()),
                })
                .collect(),
        }
        .into(),
        AstTypeDefinition::InputObject(input) => {
            let input_kind = if input.directives().any(|directive| directive.name() == ONE_OF) {
                InputObjectKind::OneOf
            } else {
                InputObjectKind::Ordinary
            };

            InputObjectType {
                name,
                description,
                input_kind,
                fields: input.fields().map(|field| convert_input_value(field)).collect(),
            }
            .into()
        }
    }
}

fn convert_field(field: ast::FieldDefinition<'_>) -> FieldDefinition {
    FieldDefinition {
        name: field.name().to_string(),
        description: field.description().map(description_text),
        arguments: field
            .arguments()
            .map(|argument| convert_input_value(argument))
            .collect(),
        ty: TypeRef::from_wrappers(field.ty().name(), field.ty().wrappers()),
        deprecation_reason: deprecation_reason(field.directives()),
    }
}

fn convert_input_value(value: ast::InputValueDefinition<'_>) -> InputValue {
    InputValue {
        name: value.name().to_string(),
        description: value.description().map(description_text),
        ty: TypeRef::from_wrappers(value.ty().name(), value.ty().wrappers()),
    }
}

fn deprecation_reason<'a>(mut directives: impl Iterator<Item = ast::Directive<'a>>) -> Option<String> {
    let directive = directives.find(|directive| directive.name() == DEPRECATED)?;

    let reason = directive
        .arguments()
        .find(|argument| argument.name() == "reason")
        .and_then(|argument| argument.value().as_str().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_DEPRECATION_REASON.to_string());

    Some(reason)
}

/// Plain strings come back from the parser with their escapes decoded. Block
/// strings keep their raw lines, so the common indentation is removed here.
fn description_text(description: ast::Description<'_>) -> String {
    let literal = description.literal();

    match literal.kind() {
        StringLiteralKind::String => literal.to_cow().into_owned(),
        StringLiteralKind::Block => block_string_value(literal.raw_str()),
    }
}

fn block_string_value(raw: &str) -> String {
    let raw = raw.replace("\\\"\"\"", "\"\"\"");
    let lines = raw.lines().collect::<Vec<_>>();

    let indentation = |line: &str| line.len() - line.trim_start_matches([' ', '\t']).len();

    let common_indent = lines
        .iter()
        .copied()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(indentation)
        .min()
        .unwrap_or(0);

    let lines = lines
        .iter()
        .copied()
        .enumerate()
        .map(|(idx, line)| if idx == 0 { line } else { line.get(common_indent..).unwrap_or_default() })
        .collect::<Vec<_>>();

    let first = lines.iter().position(|line| !line.trim().is_empty());
    let last = lines.iter().rposition(|line| !line.trim().is_empty());

    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}
