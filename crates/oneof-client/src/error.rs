/// A GraphQL request that did not produce data.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure, non-2xx status or an undecodable body.
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with GraphQL errors.
    #[error("{}", .0.join("; "))]
    GraphQL(Vec<String>),
    #[error("the response carried neither data nor errors")]
    NoData,
}

#[derive(Debug, thiserror::Error)]
pub enum IntrospectionError {
    #[error("introspection request failed: {0}")]
    Request(#[from] ClientError),
    #[error("reading the introspection result: {0}")]
    Schema(#[from] oneof_schema::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error(transparent)]
    Introspection(#[from] IntrospectionError),
    #[error("writing {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
