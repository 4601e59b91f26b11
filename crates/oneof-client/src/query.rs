use std::fmt;

use oneof_config::ClientConfig;
use oneof_search::{LooseSearchFilter, SearchFilter, SearchResult};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::ClientError;

/// The one query the client sends.
pub const SEARCH_QUERY: &str = indoc::indoc! {r"
    query Search($filter: SearchFilterInput!) {
      search(filter: $filter) {
        id
        name
        category
      }
    }
"};

/// The filter the demo client searches with.
pub fn default_filter() -> SearchFilter {
    SearchFilter::ByCategory(String::from("Electronics"))
}

#[derive(Serialize)]
struct Variables<'a, F> {
    filter: &'a F,
}

#[derive(Deserialize)]
struct SearchData {
    search: Vec<SearchResult>,
}

/// Sends [`SEARCH_QUERY`] to one endpoint.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl SearchClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            http: crate::graphql::http_client(config.timeout)?,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Searches with a one-of filter. The request carries exactly one field.
    pub async fn search(&self, filter: &SearchFilter) -> Result<Vec<SearchResult>, ClientError> {
        self.send(filter).await
    }

    /// Searches with whatever fields are set, the way a client does once its
    /// generated types lost the one-of constraint.
    pub async fn search_loose(&self, filter: &LooseSearchFilter) -> Result<Vec<SearchResult>, ClientError> {
        self.send(filter).await
    }

    async fn send<F: Serialize>(&self, filter: &F) -> Result<Vec<SearchResult>, ClientError> {
        let data: SearchData =
            crate::graphql::execute(&self.http, &self.endpoint, SEARCH_QUERY, Variables { filter }).await?;

        Ok(data.search)
    }
}

/// Where a search stands. Only `Loading` moves on, and only once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState {
    Loading,
    Error(String),
    Success(Vec<SearchResult>),
}

impl From<Result<Vec<SearchResult>, ClientError>> for QueryState {
    fn from(result: Result<Vec<SearchResult>, ClientError>) -> Self {
        match result {
            Ok(results) => QueryState::Success(results),
            Err(error) => QueryState::Error(error.to_string()),
        }
    }
}

/// A search bound to one literal filter, rendered as text.
#[derive(Debug, Clone)]
pub struct SearchComponent {
    label: String,
    filter: SearchFilter,
    state: QueryState,
}

impl SearchComponent {
    /// A component in the loading state, labelled with the filter value.
    pub fn new(filter: SearchFilter) -> Self {
        Self {
            label: filter.value().to_string(),
            filter,
            state: QueryState::Loading,
        }
    }

    pub fn filter(&self) -> &SearchFilter {
        &self.filter
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Runs the query once. A component that already settled keeps its state.
    pub async fn load(&mut self, client: &SearchClient) {
        if self.state != QueryState::Loading {
            return;
        }

        self.state = client.search(&self.filter).await.into();

        if let QueryState::Error(message) = &self.state {
            tracing::warn!("search failed: {message}");
        }
    }
}

impl fmt::Display for SearchComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            QueryState::Loading => f.write_str("Loading..."),
            QueryState::Error(message) => write!(f, "Error: {message}"),
            QueryState::Success(results) => {
                write!(f, "Search Results ({})", self.label)?;

                for result in results {
                    write!(f, "\n{} - {}", result.name, result.category)?;
                }

                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(state: QueryState) -> SearchComponent {
        SearchComponent {
            state,
            ..SearchComponent::new(default_filter())
        }
    }

    #[test]
    fn renders_loading() {
        assert_eq!("Loading...", component(QueryState::Loading).to_string());
    }

    #[test]
    fn renders_error() {
        let rendered = component(QueryState::Error(String::from("connection refused"))).to_string();

        assert_eq!("Error: connection refused", rendered);
    }

    #[test]
    fn renders_results() {
        let results = vec![
            SearchResult::new("1", "Item One", "Electronics"),
            SearchResult::new("3", "Item Three", "Electronics"),
        ];

        let expected = indoc::indoc! {"
            Search Results (Electronics)
            Item One - Electronics
            Item Three - Electronics"};

        assert_eq!(expected, component(QueryState::Success(results)).to_string());
    }

    #[test]
    fn renders_empty_results() {
        assert_eq!(
            "Search Results (Electronics)",
            component(QueryState::Success(Vec::new())).to_string()
        );
    }

    #[test]
    fn graphql_errors_become_the_error_message() {
        let error = ClientError::GraphQL(vec![String::from("first"), String::from("second")]);

        let state = QueryState::from(Err::<Vec<SearchResult>, _>(error));

        assert_eq!(QueryState::Error(String::from("first; second")), state);
    }

    #[test]
    fn query_text() {
        assert!(SEARCH_QUERY.starts_with("query Search($filter: SearchFilterInput!) {"));
    }
}
