use std::sync::Arc;

use async_graphql::{Context, EmptyMutation, EmptySubscription, InputObject, Object, OneofObject, SchemaBuilder, ID};
use oneof_config::SchemaMode;
use oneof_search::{Catalog, LooseSearchFilter, SearchFilter, SearchResult};

/// Shared handle to whichever schema the server was built with.
pub type SearchSchema = Arc<dyn Schema>;

/// Creating a trait for schema so we can use it as a trait object and avoid
/// making everything generic over the Query type, which differs per mode.
#[async_trait::async_trait]
pub trait Schema: Send + Sync {
    async fn execute(&self, request: async_graphql::Request) -> async_graphql::Response;

    fn sdl(&self) -> String;
}

#[async_trait::async_trait]
impl<Q, M, S> Schema for async_graphql::Schema<Q, M, S>
where
    Q: async_graphql::ObjectType + 'static,
    M: async_graphql::ObjectType + 'static,
    S: async_graphql::SubscriptionType + 'static,
{
    async fn execute(&self, request: async_graphql::Request) -> async_graphql::Response {
        async_graphql::Schema::execute(self, request).await
    }

    fn sdl(&self) -> String {
        self.sdl_with_options(async_graphql::SDLExportOptions::new())
    }
}

/// Builds the search schema.
///
/// In [`SchemaMode::Strict`] the filter is a one-of input object and a request
/// with zero or several fields fails before `search` runs. In
/// [`SchemaMode::Lenient`] the same fields sit on an ordinary input object and
/// the resolver falls back to field precedence.
pub fn build_schema(mode: SchemaMode, introspection: bool, catalog: Catalog) -> SearchSchema {
    fn finish<Q, M, S>(builder: SchemaBuilder<Q, M, S>, introspection: bool) -> async_graphql::Schema<Q, M, S>
    where
        Q: async_graphql::ObjectType + 'static,
        M: async_graphql::ObjectType + 'static,
        S: async_graphql::SubscriptionType + 'static,
    {
        if introspection {
            builder.finish()
        } else {
            builder.disable_introspection().finish()
        }
    }

    match mode {
        SchemaMode::Strict => {
            let builder = async_graphql::Schema::build(StrictQuery, EmptyMutation, EmptySubscription).data(catalog);
            Arc::new(finish(builder, introspection))
        }
        SchemaMode::Lenient => {
            let builder = async_graphql::Schema::build(LenientQuery, EmptyMutation, EmptySubscription).data(catalog);
            Arc::new(finish(builder, introspection))
        }
    }
}

/// Example input type using @oneOf directive
#[derive(OneofObject, Debug, Clone)]
#[graphql(name = "SearchFilterInput")]
pub enum SearchFilterInput {
    ByName(String),
    ById(ID),
    ByCategory(String),
}

impl From<SearchFilterInput> for SearchFilter {
    fn from(input: SearchFilterInput) -> Self {
        match input {
            SearchFilterInput::ByName(name) => SearchFilter::ByName(name),
            SearchFilterInput::ById(id) => SearchFilter::ById(id.0),
            SearchFilterInput::ByCategory(category) => SearchFilter::ByCategory(category),
        }
    }
}

/// Example input type using @oneOf directive
#[derive(InputObject, Debug, Clone, Default)]
#[graphql(name = "SearchFilterInput")]
pub struct LooseSearchFilterInput {
    pub by_name: Option<String>,
    pub by_id: Option<ID>,
    pub by_category: Option<String>,
}

impl From<LooseSearchFilterInput> for LooseSearchFilter {
    fn from(input: LooseSearchFilterInput) -> Self {
        LooseSearchFilter {
            by_name: input.by_name,
            by_id: input.by_id.map(|id| id.0),
            by_category: input.by_category,
        }
    }
}

struct StrictQuery;

#[Object(name = "Query")]
impl StrictQuery {
    async fn search(&self, ctx: &Context<'_>, filter: SearchFilterInput) -> async_graphql::Result<Vec<SearchResultObject>> {
        let catalog = ctx.data::<Catalog>()?;
        let results = catalog.search(&filter.into());

        Ok(results.into_iter().map(SearchResultObject).collect())
    }
}

struct LenientQuery;

#[Object(name = "Query")]
impl LenientQuery {
    async fn search(
        &self,
        ctx: &Context<'_>,
        filter: LooseSearchFilterInput,
    ) -> async_graphql::Result<Vec<SearchResultObject>> {
        let catalog = ctx.data::<Catalog>()?;
        let results = catalog.search_loose(&filter.into());

        Ok(results.into_iter().map(SearchResultObject).collect())
    }
}

struct SearchResultObject(SearchResult);

#[Object(name = "SearchResult")]
impl SearchResultObject {
    async fn id(&self) -> ID {
        ID(self.0.id.clone())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn category(&self) -> &str {
        &self.0.category
    }
}
