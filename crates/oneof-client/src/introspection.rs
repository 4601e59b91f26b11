use std::time::Duration;

use oneof_schema::{IntrospectionCapabilities, IntrospectionData, SchemaDocument};
use url::Url;

use crate::IntrospectionError;

/// Introspects the schema served at `url`.
///
/// `capabilities` picks the query. [`IntrospectionCapabilities::Legacy`] never
/// asks for `isOneOf`, so every input object of the result is ordinary.
/// `timeout` bounds the request the same way `[client] timeout` bounds
/// searches.
pub async fn introspect(
    url: &Url,
    capabilities: IntrospectionCapabilities,
    timeout: Option<Duration>,
) -> Result<SchemaDocument, IntrospectionError> {
    let client = crate::graphql::http_client(timeout)?;
    let query = capabilities.query();

    let data: IntrospectionData =
        crate::graphql::execute(&client, url, &query, serde_json::Map::new()).await?;

    let document = SchemaDocument::from_introspection(&data.schema, capabilities)?;

    tracing::debug!(
        %url,
        ?capabilities,
        types = document.types.len(),
        one_of_inputs = document.input_objects().filter(|input| input.input_kind.is_one_of()).count(),
        "introspected schema"
    );

    Ok(document)
}
