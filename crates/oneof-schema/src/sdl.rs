use std::fmt::{self, Write};

use crate::{
    is_builtin, EnumType, FieldDefinition, InputObjectType, InputValue, ObjectType, SchemaDocument, TypeDefinition,
    UnionType,
};

const INDENTATION: &str = "  ";

/// Options for [`SchemaDocument::to_sdl_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SdlOptions {
    /// Print `@oneOf` and `@deprecated`, plus the `@oneOf` definition. Without
    /// them the rendered SDL is exactly what a lossy export produces.
    pub include_directives: bool,
}

impl Default for SdlOptions {
    fn default() -> Self {
        Self {
            include_directives: true,
        }
    }
}

impl SdlOptions {
    pub fn without_directives() -> Self {
        Self {
            include_directives: false,
        }
    }
}

impl SchemaDocument {
    pub fn to_sdl(&self) -> String {
        self.to_sdl_with_options(SdlOptions::default())
    }

    pub fn to_sdl_with_options(&self, options: SdlOptions) -> String {
        let mut sdl = String::new();
        self.write_sdl(&mut sdl, options).ok();
        sdl
    }

    fn write_sdl(&self, sdl: &mut String, options: SdlOptions) -> fmt::Result {
        let mut blocks = Vec::new();

        if options.include_directives && self.has_one_of_inputs() {
            blocks.push("directive @oneOf on INPUT_OBJECT\n".to_string());
        }

        if let Some(schema) = self.schema_definition() {
            blocks.push(schema);
        }

        for definition in self.types.iter().filter(|definition| !is_builtin(definition.name())) {
            let mut block = String::new();
            write_definition(&mut block, definition, options)?;
            blocks.push(block);
        }

        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                sdl.push('\n');
            }
            sdl.push_str(block);
        }

        Ok(())
    }

    fn schema_definition(&self) -> Option<String> {
        let default_roots = self.query_type == "Query"
            && self.mutation_type.as_deref().map_or(true, |name| name == "Mutation")
            && self.subscription_type.as_deref().map_or(true, |name| name == "Subscription");

        if default_roots {
            return None;
        }

        let mut schema = String::from("schema {\n");

        for (operation, name) in [
            ("query", Some(self.query_type.as_str())),
            ("mutation", self.mutation_type.as_deref()),
            ("subscription", self.subscription_type.as_deref()),
        ] {
            if let Some(name) = name {
                schema.push_str(INDENTATION);
                schema.push_str(operation);
                schema.push_str(": ");
                schema.push_str(name);
                schema.push('\n');
            }
        }

        schema.push_str("}\n");

        Some(schema)
    }
}

fn write_definition(sdl: &mut String, definition: &TypeDefinition, options: SdlOptions) -> fmt::Result {
    write_description(sdl, definition.description(), "")?;

    match definition {
        TypeDefinition::Scalar(scalar) => writeln!(sdl, "scalar {}", scalar.name),
        TypeDefinition::Object(object) => write_object(sdl, "type", object, options),
        TypeDefinition::Interface(interface) => write_object(sdl, "interface", interface, options),
        TypeDefinition::Union(union) => write_union(sdl, union),
        TypeDefinition::Enum(enm) => write_enum(sdl, enm, options),
        TypeDefinition::InputObject(input) => write_input_object(sdl, input, options),
    }
}

fn write_object(sdl: &mut String, keyword: &str, object: &ObjectType, options: SdlOptions) -> fmt::Result {
    write!(sdl, "{keyword} {}", object.name)?;

    if !object.interfaces.is_empty() {
        write!(sdl, " implements {}", object.interfaces.join(" & "))?;
    }

    sdl.push_str(" {\n");

    for field in &object.fields {
        write_field(sdl, field, options)?;
    }

    sdl.push_str("}\n");

    Ok(())
}

fn write_field(sdl: &mut String, field: &FieldDefinition, options: SdlOptions) -> fmt::Result {
    write_description(sdl, field.description.as_deref(), INDENTATION)?;
    write!(sdl, "{INDENTATION}{}", field.name)?;

    if !field.arguments.is_empty() {
        let arguments = field
            .arguments
            .iter()
            .map(|argument| format!("{}: {}", argument.name, argument.ty))
            .collect::<Vec<_>>();

        write!(sdl, "({})", arguments.join(", "))?;
    }

    write!(sdl, ": {}", field.ty)?;
    write_deprecation(sdl, field.deprecation_reason.as_deref(), options)?;

    sdl.push('\n');

    Ok(())
}

fn write_union(sdl: &mut String, union: &UnionType) -> fmt::Result {
    writeln!(sdl, "union {} = {}", union.name, union.members.join(" | "))
}

fn write_enum(sdl: &mut String, enm: &EnumType, options: SdlOptions) -> fmt::Result {
    writeln!(sdl, "enum {} {{", enm.name)?;

    for value in &enm.values {
        write_description(sdl, value.description.as_deref(), INDENTATION)?;
        write!(sdl, "{INDENTATION}{}", value.name)?;
        write_deprecation(sdl, value.deprecation_reason.as_deref(), options)?;
        sdl.push('\n');
    }

    sdl.push_str("}\n");

    Ok(())
}

fn write_input_object(sdl: &mut String, input: &InputObjectType, options: SdlOptions) -> fmt::Result {
    write!(sdl, "input {}", input.name)?;

    if options.include_directives && input.input_kind.is_one_of() {
        sdl.push_str(" @oneOf");
    }

    sdl.push_str(" {\n");

    for InputValue { name, description, ty } in &input.fields {
        write_description(sdl, description.as_deref(), INDENTATION)?;
        writeln!(sdl, "{INDENTATION}{name}: {ty}")?;
    }

    sdl.push_str("}\n");

    Ok(())
}

fn write_deprecation(sdl: &mut String, reason: Option<&str>, options: SdlOptions) -> fmt::Result {
    match reason {
        Some(reason) if options.include_directives => {
            write!(sdl, " @deprecated(reason: \"{}\")", reason.replace('\\', "\\\\").replace('"', "\\\""))
        }
        _ => Ok(()),
    }
}

fn write_description(sdl: &mut String, description: Option<&str>, indentation: &str) -> fmt::Result {
    let Some(description) = description.filter(|description| !description.is_empty()) else {
        return Ok(());
    };

    writeln!(sdl, "{indentation}\"\"\"")?;

    for line in description.replace("\"\"\"", "\\\"\"\"").lines() {
        writeln!(sdl, "{indentation}{line}")?;
    }

    writeln!(sdl, "{indentation}\"\"\"")
}
