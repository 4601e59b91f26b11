//! A versioned schema description in which every input object is explicitly
//! tagged as either one-of or ordinary.
//!
//! The description can be built from an introspection result, rendered to SDL,
//! parsed back from SDL and stored as JSON. None of these conversions has a
//! default for the input object tag, so the `@oneOf` constraint cannot vanish
//! silently: it is either carried over, or the conversion says why it was not.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod change;
mod document;
mod error;
mod from_sdl;
mod introspection;
mod sdl;
mod type_ref;

pub use change::{compare, OneOfChange, OneOfChangeKind};
pub use document::{
    EnumType, EnumValue, FieldDefinition, InputObjectKind, InputObjectType, InputValue, ObjectType, ScalarType,
    SchemaDocument, TypeDefinition, UnionType, SCHEMA_VERSION,
};
pub use error::Error;
pub use introspection::{IntrospectionCapabilities, IntrospectionData, IntrospectionSchema};
pub use sdl::SdlOptions;
pub use type_ref::TypeRef;

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) const BUILTIN_SCALARS: &[&str] = &["String", "ID", "Int", "Float", "Boolean"];

pub(crate) fn is_builtin(name: &str) -> bool {
    name.starts_with("__") || BUILTIN_SCALARS.contains(&name)
}
