use std::fmt::{self, Write};

use oneof_schema::{
    EnumType, InputObjectKind, InputObjectType, InputValue, ObjectType, SchemaDocument, TypeDefinition, TypeRef,
    UnionType,
};

const BUILTIN_SCALARS: &[(&str, &str)] = &[
    ("ID", "string"),
    ("String", "string"),
    ("Boolean", "boolean"),
    ("Int", "number"),
    ("Float", "number"),
];

#[derive(Debug, Clone, Copy)]
pub struct TypeScriptOptions {
    /// Leave `__typename` out of object interfaces.
    pub skip_typename: bool,
}

impl Default for TypeScriptOptions {
    fn default() -> Self {
        Self { skip_typename: true }
    }
}

/// Renders TypeScript definitions for every type of the schema, in document
/// order, preceded by the `Maybe` helper and the `Scalars` map.
///
/// A one-of input object becomes a union with one single-field member per
/// field. An ordinary input object becomes an interface of optional,
/// nullable properties.
pub fn generate(document: &SchemaDocument, options: TypeScriptOptions) -> String {
    let mut items = vec![
        Item::Raw(String::from("export type Maybe<T> = T | null;")),
        Item::Raw(scalars(document)),
    ];

    for definition in &document.types {
        match definition {
            TypeDefinition::Scalar(_) => (),
            TypeDefinition::Object(object) => {
                items.push(Item::Interface(object_interface(object, options)));
                items.extend(argument_interfaces(object).map(Item::Interface));
            }
            TypeDefinition::Interface(object) => {
                items.push(Item::Interface(object_interface(object, TypeScriptOptions { skip_typename: true })));
                items.extend(argument_interfaces(object).map(Item::Interface));
            }
            TypeDefinition::Union(union) => items.push(Item::Alias(union_alias(union))),
            TypeDefinition::Enum(enm) => items.push(Item::Alias(enum_alias(enm))),
            TypeDefinition::InputObject(input) => match input.input_kind {
                InputObjectKind::OneOf => items.push(Item::Alias(one_of_alias(input))),
                InputObjectKind::Ordinary => items.push(Item::Interface(input_interface(input))),
            },
        }
    }

    let mut output = items.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n\n");
    output.push('\n');

    output
}

fn scalars(document: &SchemaDocument) -> String {
    let custom = document.types.iter().filter_map(|definition| match definition {
        TypeDefinition::Scalar(scalar) => Some((scalar.name.as_str(), "unknown")),
        _ => None,
    });

    let mut output = String::from("export type Scalars = {\n");

    for (name, ty) in BUILTIN_SCALARS.iter().copied().chain(custom) {
        writeln!(output, "  {name}: {ty};").ok();
    }

    output.push_str("};");
    output
}

fn object_interface(object: &ObjectType, options: TypeScriptOptions) -> Interface {
    let mut interface = Interface::new(&object.name, object.description.as_deref());

    if !options.skip_typename {
        interface.push(Property::optional("__typename", format!("'{}'", object.name)));
    }

    for field in &object.fields {
        interface.push(Property::required(&field.name, output_type(&field.ty)));
    }

    interface
}

/// `QuerySearchArgs` for `Query.search(filter: ...)`.
fn argument_interfaces(object: &ObjectType) -> impl Iterator<Item = Interface> + '_ {
    object
        .fields
        .iter()
        .filter(|field| !field.arguments.is_empty())
        .map(|field| {
            let name = format!("{}{}Args", object.name, capitalize(&field.name));
            let mut interface = Interface::new(&name, None);

            for argument in &field.arguments {
                interface.push(input_property(argument));
            }

            interface
        })
}

fn input_interface(input: &InputObjectType) -> Interface {
    let mut interface = Interface::new(&input.name, input.description.as_deref());

    for field in &input.fields {
        interface.push(input_property(field));
    }

    interface
}

fn input_property(value: &InputValue) -> Property {
    if value.ty.is_non_null() {
        Property::required(&value.name, output_type(&value.ty))
    } else {
        Property::optional(&value.name, output_type(&value.ty))
    }
}

/// Exactly one member object per field, each with that field set and non-null.
fn one_of_alias(input: &InputObjectType) -> Alias {
    let variants = input
        .fields
        .iter()
        .map(|field| format!("{{ {}: {} }}", field.name, non_null_type(&field.ty)))
        .collect();

    Alias {
        name: input.name.clone(),
        description: input.description.clone(),
        variants,
        multiline: true,
    }
}

fn union_alias(union: &UnionType) -> Alias {
    Alias {
        name: union.name.clone(),
        description: union.description.clone(),
        variants: union.members.clone(),
        multiline: false,
    }
}

fn enum_alias(enm: &EnumType) -> Alias {
    Alias {
        name: enm.name.clone(),
        description: enm.description.clone(),
        variants: enm.values.iter().map(|value| format!("'{}'", value.name)).collect(),
        multiline: false,
    }
}

/// `Maybe<...>` unless the reference is non-null.
fn output_type(ty: &TypeRef) -> String {
    match ty {
        TypeRef::NonNull(inner) => non_null_type(inner),
        other => format!("Maybe<{}>", non_null_type(other)),
    }
}

fn non_null_type(ty: &TypeRef) -> String {
    match ty {
        TypeRef::NonNull(inner) => non_null_type(inner),
        TypeRef::List(inner) => format!("Array<{}>", output_type(inner)),
        TypeRef::Named(name) => named_type(name),
    }
}

fn named_type(name: &str) -> String {
    if BUILTIN_SCALARS.iter().any(|(scalar, _)| *scalar == name) {
        format!("Scalars['{name}']")
    } else {
        name.to_string()
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

enum Item {
    Raw(String),
    Interface(Interface),
    Alias(Alias),
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Raw(raw) => f.write_str(raw),
            Item::Interface(interface) => fmt::Display::fmt(interface, f),
            Item::Alias(alias) => fmt::Display::fmt(alias, f),
        }
    }
}

struct Interface {
    name: String,
    description: Option<String>,
    properties: Vec<Property>,
}

impl Interface {
    fn new(name: &str, description: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            description: description.map(ToString::to_string),
            properties: Vec::new(),
        }
    }

    fn push(&mut self, property: Property) {
        self.properties.push(property);
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_doc(f, self.description.as_deref())?;
        writeln!(f, "export interface {} {{", self.name)?;

        for property in &self.properties {
            writeln!(f, "  {property};")?;
        }

        f.write_str("}")
    }
}

struct Property {
    name: String,
    optional: bool,
    ty: String,
}

impl Property {
    fn required(name: &str, ty: String) -> Self {
        Self {
            name: name.to_string(),
            optional: false,
            ty,
        }
    }

    fn optional(name: &str, ty: String) -> Self {
        Self {
            name: name.to_string(),
            optional: true,
            ty,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let optional = if self.optional { "?" } else { "" };

        write!(f, "{}{optional}: {}", self.name, self.ty)
    }
}

struct Alias {
    name: String,
    description: Option<String>,
    variants: Vec<String>,
    multiline: bool,
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_doc(f, self.description.as_deref())?;
        write!(f, "export type {} =", self.name)?;

        if self.variants.is_empty() {
            return f.write_str(" never;");
        }

        if self.multiline {
            for variant in &self.variants {
                write!(f, "\n  | {variant}")?;
            }
        } else {
            write!(f, " {}", self.variants.join(" | "))?;
        }

        f.write_str(";")
    }
}

fn write_doc(f: &mut fmt::Formatter<'_>, description: Option<&str>) -> fmt::Result {
    let Some(description) = description else {
        return Ok(());
    };

    let lines: Vec<_> = description.lines().collect();

    match lines.as_slice() {
        [line] => writeln!(f, "/** {line} */"),
        lines => {
            writeln!(f, "/**")?;

            for line in lines {
                writeln!(f, " * {line}")?;
            }

            writeln!(f, " */")
        }
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use oneof_schema::{EnumValue, FieldDefinition};

    use super::*;

    fn search_schema(input_kind: InputObjectKind) -> SchemaDocument {
        let mut filter = InputObjectType::new(
            "SearchFilterInput",
            input_kind,
            vec![
                InputValue::new("byName", TypeRef::named("String")),
                InputValue::new("byId", TypeRef::named("ID")),
                InputValue::new("byCategory", TypeRef::named("String")),
            ],
        );
        filter.description = Some(String::from("Example input type using @oneOf directive"));

        SchemaDocument::new("Query")
            .with_type(ObjectType::new(
                "Query",
                vec![
                    FieldDefinition::new("search", TypeRef::named("SearchResult").non_null().list().non_null())
                        .with_argument(InputValue::new("filter", TypeRef::named("SearchFilterInput").non_null())),
                ],
            ))
            .with_type(filter)
            .with_type(ObjectType::new(
                "SearchResult",
                vec![
                    FieldDefinition::new("id", TypeRef::named("ID").non_null()),
                    FieldDefinition::new("name", TypeRef::named("String").non_null()),
                    FieldDefinition::new("category", TypeRef::named("String").non_null()),
                ],
            ))
    }

    #[test]
    fn one_of_input_is_a_union_of_single_field_objects() {
        let output = generate(&search_schema(InputObjectKind::OneOf), TypeScriptOptions::default());

        let expected = expect![[r#"
            export type Maybe<T> = T | null;

            export type Scalars = {
              ID: string;
              String: string;
              Boolean: boolean;
              Int: number;
              Float: number;
            };

            export interface Query {
              search: Array<SearchResult>;
            }

            export interface QuerySearchArgs {
              filter: SearchFilterInput;
            }

            /** Example input type using @oneOf directive */
            export type SearchFilterInput =
              | { byName: Scalars['String'] }
              | { byId: Scalars['ID'] }
              | { byCategory: Scalars['String'] };

            export interface SearchResult {
              id: Scalars['ID'];
              name: Scalars['String'];
              category: Scalars['String'];
            }
        "#]];

        expected.assert_eq(&output);
    }

    #[test]
    fn ordinary_input_has_optional_fields() {
        let output = generate(&search_schema(InputObjectKind::Ordinary), TypeScriptOptions::default());
        let filter = output.split("\n\n").find(|item| item.contains("SearchFilterInput {")).unwrap();

        let expected = expect![[r#"
            /** Example input type using @oneOf directive */
            export interface SearchFilterInput {
              byName?: Maybe<Scalars['String']>;
              byId?: Maybe<Scalars['ID']>;
              byCategory?: Maybe<Scalars['String']>;
            }"#]];

        expected.assert_eq(filter);
    }

    #[test]
    fn typename_when_not_skipped() {
        let document = SchemaDocument::new("Query").with_type(ObjectType::new(
            "Query",
            vec![FieldDefinition::new("tags", TypeRef::named("String").list())],
        ));

        let output = generate(&document, TypeScriptOptions { skip_typename: false });
        let query = output.split("\n\n").last().unwrap();

        let expected = expect![[r#"
            export interface Query {
              __typename?: 'Query';
              tags: Maybe<Array<Maybe<Scalars['String']>>>;
            }
        "#]];

        expected.assert_eq(query);
    }

    #[test]
    fn enums_unions_and_custom_scalars() {
        let document = SchemaDocument::new("Query")
            .with_type(oneof_schema::ScalarType {
                name: String::from("DateTime"),
                description: None,
            })
            .with_type(EnumType {
                name: String::from("Category"),
                description: Some(String::from("Catalog sections.\nKept in sync by hand.")),
                values: ["ELECTRONICS", "BOOKS"]
                    .into_iter()
                    .map(|name| EnumValue {
                        name: name.to_string(),
                        description: None,
                        deprecation_reason: None,
                    })
                    .collect(),
            })
            .with_type(UnionType {
                name: String::from("Hit"),
                description: None,
                members: vec![String::from("Item"), String::from("Shelf")],
            });

        let output = generate(&document, TypeScriptOptions::default());

        let expected = expect![[r#"
            export type Maybe<T> = T | null;

            export type Scalars = {
              ID: string;
              String: string;
              Boolean: boolean;
              Int: number;
              Float: number;
              DateTime: unknown;
            };

            /**
             * Catalog sections.
             * Kept in sync by hand.
             */
            export type Category = 'ELECTRONICS' | 'BOOKS';

            export type Hit = Item | Shelf;
        "#]];

        expected.assert_eq(&output);
    }
}
