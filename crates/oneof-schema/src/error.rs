/// Errors raised while building, reading or converting a schema description.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The JSON document was written by an incompatible version.
    #[error("unsupported schema document version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
    /// The JSON document could not be read or written.
    #[error("invalid schema document: {0}")]
    Json(#[from] serde_json::Error),
    /// The SDL could not be parsed.
    #[error("parsing SDL: {0}")]
    Sdl(String),
    /// A type reference such as `[String!]!` is malformed.
    #[error("invalid type reference `{0}`")]
    InvalidTypeRef(String),
    /// The introspection result asked for `isOneOf` but an input object did not carry it.
    #[error("input object `{0}` has no isOneOf marker in the introspection result")]
    MissingOneOfMarker(String),
    /// A wrapping type in the introspection result had no inner type, or a named type no name.
    #[error("malformed type reference in the introspection result of `{0}`")]
    MalformedIntrospectedType(String),
}
