use std::path::PathBuf;

use oneof_schema::IntrospectionCapabilities;
use url::Url;

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodegenConfig {
    /// Endpoint to introspect. Falls back to the client endpoint.
    pub schema: Option<Url>,
    /// Introspection query flavour. `legacy` does not ask for `isOneOf`.
    pub capabilities: IntrospectionCapabilities,
    /// Print directives, `@oneOf` included, in the exported SDL.
    pub include_directives: bool,
    /// Leave `__typename` out of generated object types.
    pub skip_typename: bool,
    pub generates: GeneratesConfig,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            schema: None,
            capabilities: IntrospectionCapabilities::default(),
            include_directives: true,
            skip_typename: true,
            generates: GeneratesConfig::default(),
        }
    }
}

impl CodegenConfig {
    pub fn schema_url(&self, client: &crate::ClientConfig) -> Url {
        self.schema.clone().unwrap_or_else(|| client.endpoint.clone())
    }
}

/// Output files, relative to the working directory.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratesConfig {
    /// SDL of the introspected schema.
    pub schema_ast: Option<PathBuf>,
    /// TypeScript type definitions.
    pub types: Option<PathBuf>,
}

impl Default for GeneratesConfig {
    fn default() -> Self {
        Self {
            schema_ast: Some(PathBuf::from("generated/schema.graphql")),
            types: Some(PathBuf::from("generated/types.ts")),
        }
    }
}
