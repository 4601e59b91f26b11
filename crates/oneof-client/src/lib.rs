//! The client side of the search schema: the fixed search query and its
//! rendered state, schema introspection, and the codegen that turns an
//! introspected schema into SDL and TypeScript.

#![cfg_attr(test, allow(unused_crate_dependencies))]

pub mod codegen;
mod error;
mod graphql;
mod introspection;
mod query;

pub use error::{ClientError, CodegenError, IntrospectionError};
pub use introspection::introspect;
pub use query::{default_filter, QueryState, SearchClient, SearchComponent, SEARCH_QUERY};

const USER_AGENT: &str = concat!("oneof-search/", env!("CARGO_PKG_VERSION"));
