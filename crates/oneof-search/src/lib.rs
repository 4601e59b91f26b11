//! The search catalog and the one-of filter it is queried with.
//!
//! A [`SearchFilter`] can only ever hold one criterion. The flat
//! [`LooseSearchFilter`] is what a client sees once the `@oneOf` marker has been
//! dropped from its copy of the schema: all fields optional, any combination
//! allowed. Converting between the two is where the exactly-one rule is checked.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod catalog;
mod error;
mod filter;

pub use catalog::{Catalog, SearchResult};
pub use error::FilterError;
pub use filter::{LooseSearchFilter, SearchFilter};

/// GraphQL name of the filter input object.
pub const SEARCH_FILTER_INPUT: &str = "SearchFilterInput";
