#![allow(unused_crate_dependencies)]

use oneof_schema::{
    compare, FieldDefinition, InputObjectKind, InputObjectType, InputValue, ObjectType, OneOfChangeKind,
    SchemaDocument, SdlOptions, TypeRef,
};

fn search_schema() -> SchemaDocument {
    SchemaDocument::new("Query")
        .with_type(ObjectType::new(
            "Query",
            vec![
                FieldDefinition::new("search", TypeRef::named("SearchResult").non_null().list().non_null())
                    .with_argument(InputValue::new("filter", TypeRef::named("SearchFilterInput").non_null())),
            ],
        ))
        .with_type(InputObjectType::new(
            "SearchFilterInput",
            InputObjectKind::OneOf,
            vec![
                InputValue::new("byName", TypeRef::named("String")),
                InputValue::new("byId", TypeRef::named("ID")),
                InputValue::new("byCategory", TypeRef::named("String")),
            ],
        ))
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
fn sdl_export_then_import_keeps_one_of() {
    let exported = search_schema();
    let imported = SchemaDocument::from_sdl(&exported.to_sdl()).unwrap();

    assert!(compare(&exported, &imported).is_empty());
    assert_eq!(imported, exported);
}

#[test]
fn sdl_export_without_directives_loses_one_of() {
    let exported = search_schema();
    let imported = SchemaDocument::from_sdl(&exported.to_sdl_with_options(SdlOptions::without_directives())).unwrap();

    let changes = compare(&exported, &imported);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].path, "SearchFilterInput");
    assert_eq!(changes[0].kind, OneOfChangeKind::LoseOneOf);
}

#[test]
fn json_export_then_import_keeps_one_of() {
    let exported = search_schema();
    let imported = SchemaDocument::from_json(&exported.to_json().unwrap()).unwrap();

    assert!(compare(&exported, &imported).is_empty());
    assert_eq!(
        imported.input_object("SearchFilterInput").unwrap().input_kind,
        InputObjectKind::OneOf
    );
}
