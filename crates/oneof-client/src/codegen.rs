//! Schema export: introspect a server, then write its SDL and TypeScript
//! definitions to the configured outputs.

mod typescript;

use std::path::{Path, PathBuf};

use oneof_config::{CodegenConfig, Config, GeneratesConfig};
use oneof_schema::{SchemaDocument, SdlOptions};

use crate::CodegenError;

pub use typescript::{generate as generate_typescript, TypeScriptOptions};

/// The rendered outputs, before they are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub schema_ast: String,
    pub types: String,
}

impl Generated {
    pub fn new(document: &SchemaDocument, config: &CodegenConfig) -> Self {
        let sdl_options = SdlOptions {
            include_directives: config.include_directives,
        };

        let ts_options = TypeScriptOptions {
            skip_typename: config.skip_typename,
        };

        Self {
            schema_ast: document.to_sdl_with_options(sdl_options),
            types: generate_typescript(document, ts_options),
        }
    }

    /// Writes every configured output under `base`, creating missing
    /// directories. Returns the written paths.
    pub fn write(&self, generates: &GeneratesConfig, base: &Path) -> Result<Vec<PathBuf>, CodegenError> {
        let outputs = [(&generates.schema_ast, &self.schema_ast), (&generates.types, &self.types)];
        let mut written = Vec::new();

        for (path, content) in outputs {
            let Some(path) = path else { continue };
            let path = base.join(path);

            write_file(&path, content)?;
            tracing::info!("wrote {}", path.display());

            written.push(path);
        }

        Ok(written)
    }
}

/// Introspects the configured schema and writes the outputs under `base`.
pub async fn run(config: &Config, base: &Path) -> Result<Vec<PathBuf>, CodegenError> {
    let url = config.codegen.schema_url(&config.client);
    let document = crate::introspect(&url, config.codegen.capabilities, config.client.timeout).await?;

    let lost = document.input_objects().filter(|input| !input.input_kind.is_one_of()).count();
    if lost > 0 && config.codegen.capabilities == oneof_schema::IntrospectionCapabilities::Legacy {
        tracing::warn!("legacy introspection: {lost} input object(s) recorded without one-of information");
    }

    Generated::new(&document, &config.codegen).write(&config.codegen.generates, base)
}

fn write_file(path: &Path, content: &str) -> Result<(), CodegenError> {
    let error = |source| CodegenError::Write {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(error)?;
    }

    std::fs::write(path, content).map_err(error)
}
